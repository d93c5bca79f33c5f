//! Display formatting for distances, speeds and elapsed times.
//!
//! Distances render with three decimals, speeds with two. Callers pass the unit
//! multiplier, suffix and hour label through [`DisplayUnits`].

use crate::error::FormatError;
use crate::units::DisplayUnits;
use tracing::trace;

/// Format elapsed seconds as "H:MM:SS" once an hour has passed, "MM:SS" before
pub fn format_elapsed_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Render `value` with `decimals` fixed decimals, rounding ties away from zero.
///
/// Rounding starts from the shortest decimal form of the value, so 0.125
/// renders as "0.13" where `{:.2}` would give "0.12".
pub fn fixed_half_up(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));
    let frac_digits = frac_part.as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend((0..decimals).map(|i| frac_digits.get(i).copied().unwrap_or(b'0')));

    if frac_digits.get(decimals).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let mut output = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        output.push('-');
    }
    output.extend(digits[..split].iter().map(|d| *d as char));
    if decimals > 0 {
        output.push('.');
        output.extend(digits[split..].iter().map(|d| *d as char));
    }
    output
}

/// Distance in display units, truncated to whole (scaled) meters
fn scaled_distance(distance_in_meters: f64, multiplier: f64) -> String {
    let viewing_distance = (distance_in_meters * multiplier) as i64;
    fixed_half_up(viewing_distance as f64 / 1000.0, 3)
}

fn speed_text(speed: f64) -> String {
    fixed_half_up(speed, 2)
}

fn clamp_elapsed(time_elapsed: i64) -> u64 {
    time_elapsed.max(0) as u64
}

/// Live distance and average speed, e.g. "5.000 km at 10.00 km/h".
///
/// Speed is zero when no time has elapsed yet.
pub fn visual_distance(
    distance_in_meters: f64,
    total_time_in_secs: i64,
    units: &DisplayUnits,
) -> String {
    let speed = units.average_per_hour(distance_in_meters, total_time_in_secs);
    trace!(distance_in_meters, total_time_in_secs, speed, "visual distance");
    format!(
        "{} {} at {} {}/{}",
        scaled_distance(distance_in_meters, units.multiplier),
        units.suffix,
        speed_text(speed),
        units.suffix,
        units.hour_label
    )
}

/// Distance for the trip report, e.g. "5.000 km"
pub fn distance_for_report(distance_in_meters: f64, units: &DisplayUnits) -> String {
    format!(
        "{} {}",
        scaled_distance(distance_in_meters, units.multiplier),
        units.suffix
    )
}

/// Elapsed time substituted into a one-placeholder template, e.g. "Time: {}"
pub fn visual_time(time_elapsed: i64, template: &str) -> Result<String, FormatError> {
    let elapsed = format_elapsed_time(clamp_elapsed(time_elapsed));
    fill_template(template, &[elapsed.as_str()])
}

/// Elapsed time for the trip report. Negative input reads as zero.
pub fn time_for_report(time_elapsed: i64) -> String {
    format_elapsed_time(clamp_elapsed(time_elapsed))
}

/// Instantaneous speed for the trip report, e.g. "36.00 km/h"
pub fn speed_for_report(speed_in_meters_per_sec: f64, units: &DisplayUnits) -> String {
    format!(
        "{} {}/{}",
        speed_text(units.per_hour(speed_in_meters_per_sec)),
        units.suffix,
        units.hour_label
    )
}

/// Average speed for the trip report; "0.00" when no time has elapsed
pub fn average_speed_for_report(
    distance_in_meters: f64,
    total_time_in_secs: i64,
    units: &DisplayUnits,
) -> String {
    format!(
        "{} {}/{}",
        speed_text(units.average_per_hour(distance_in_meters, total_time_in_secs)),
        units.suffix,
        units.hour_label
    )
}

/// Current speed substituted into a three-placeholder template.
///
/// Placeholders receive, in order, the speed (two decimals), the unit suffix
/// and the hour label: `"Speed: {} {}/{}"` gives `"Speed: 36.00 km/h"`.
pub fn visual_current_speed(
    speed_in_meters_per_sec: f64,
    units: &DisplayUnits,
    template: &str,
) -> Result<String, FormatError> {
    let speed = speed_text(units.per_hour(speed_in_meters_per_sec));
    fill_template(
        template,
        &[speed.as_str(), units.suffix.as_str(), units.hour_label.as_str()],
    )
}

/// Substitute `values` into the `{}` placeholders of `template`, in order.
///
/// `{{` and `}}` produce literal braces. The number of placeholders must equal
/// the number of values.
pub fn fill_template(template: &str, values: &[&str]) -> Result<String, FormatError> {
    let capacity = template.len() + values.iter().map(|v| v.len()).sum::<usize>();
    let mut output = String::with_capacity(capacity);
    let mut found = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => match chars.peek() {
                Some((_, '{')) => {
                    chars.next();
                    output.push('{');
                }
                Some((_, '}')) => {
                    chars.next();
                    if let Some(value) = values.get(found) {
                        output.push_str(value);
                    }
                    found += 1;
                }
                _ => {
                    return Err(FormatError::UnbalancedBrace {
                        template: template.to_string(),
                        position,
                    })
                }
            },
            '}' => match chars.peek() {
                Some((_, '}')) => {
                    chars.next();
                    output.push('}');
                }
                _ => {
                    return Err(FormatError::UnbalancedBrace {
                        template: template.to_string(),
                        position,
                    })
                }
            },
            _ => output.push(c),
        }
    }

    if found != values.len() {
        return Err(FormatError::PlaceholderCount {
            template: template.to_string(),
            expected: values.len(),
            found,
        });
    }

    Ok(output)
}
