//! Linear scales, extent helpers and "nice" axis ticks.

use serde::Serialize;

/// Factor applied to the data minimum before it becomes the domain start.
pub const DOMAIN_PAD_LOW: f64 = 0.8;
/// Factor applied to the data maximum before it becomes the domain end.
pub const DOMAIN_PAD_HIGH: f64 = 1.2;

/// Minimum and maximum of the non-NaN values, or `None` when there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Maps a continuous domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain `[min * 0.8, max * 1.2]` over the valid values.
    ///
    /// With no valid values the domain is NaN and every mapped position is NaN.
    pub fn padded(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let domain = extent(values)
            .map(|(lo, hi)| (lo * DOMAIN_PAD_LOW, hi * DOMAIN_PAD_HIGH))
            .unwrap_or((f64::NAN, f64::NAN));
        Self::new(domain, range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Data value to pixel.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 {
            if value.is_nan() {
                f64::NAN
            } else {
                0.5
            }
        } else {
            (value - d0) / span
        };
        r0 + t * (r1 - r0)
    }

    /// Scale whose domain lies `t` of the way from `self` to `target`.
    pub fn lerp(&self, target: &LinearScale, t: f64) -> LinearScale {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        LinearScale {
            domain: (
                mix(self.domain.0, target.domain.0),
                mix(self.domain.1, target.domain.1),
            ),
            range: (
                mix(self.range.0, target.range.0),
                mix(self.range.1, target.range.1),
            ),
        }
    }

    /// Roughly `count` round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 || !d0.is_finite() || !d1.is_finite() {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }
        let (start, stop, reversed) = if d1 < d0 {
            (d1, d0, true)
        } else {
            (d0, d1, false)
        };

        let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
            return Vec::new();
        };
        if i2 < i1 {
            return Vec::new();
        }

        let mut ticks: Vec<f64> = (i1..=i2)
            .map(|i| {
                if inc < 0.0 {
                    i as f64 / -inc
                } else {
                    i as f64 * inc
                }
            })
            .collect();
        if reversed {
            ticks.reverse();
        }
        ticks
    }

    /// Distance between adjacent ticks produced by [`LinearScale::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        let (start, stop) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        match tick_spec(start, stop, count as f64) {
            Some((_, _, inc)) if inc < 0.0 => 1.0 / -inc,
            Some((_, _, inc)) => inc,
            None => f64::NAN,
        }
    }

    /// Tick values paired with their formatted labels.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let step = self.tick_step(count);
        self.ticks(count)
            .into_iter()
            .map(|v| (v, format_tick(v, step)))
            .collect()
    }
}

/// Integer bounds and increment of the tick sequence. A negative increment
/// means "divide by", which keeps sub-unit steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let div = 10f64.powf(-power) / factor;
        i1 = (start * div).round() as i64;
        i2 = (stop * div).round() as i64;
        if (i1 as f64) / div < start {
            i1 += 1;
        }
        if (i2 as f64) / div > stop {
            i2 -= 1;
        }
        inc = -div;
    } else {
        let mul = 10f64.powf(power) * factor;
        i1 = (start / mul).round() as i64;
        i2 = (stop / mul).round() as i64;
        if (i1 as f64) * mul < start {
            i1 += 1;
        }
        if (i2 as f64) * mul > stop {
            i2 -= 1;
        }
        inc = mul;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Fixed-point with just enough decimals for `step`, grouped by thousands.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 {
        (-step.abs().log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{:.*}", decimals, value);
    group_thousands(&text)
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" reads badly on an axis
    if grouped.chars().all(|c| c == '0' || c == ',') && frac_part.chars().all(|c| c == '.' || c == '0') {
        return format!("{grouped}{frac_part}");
    }
    format!("{sign}{grouped}{frac_part}")
}
