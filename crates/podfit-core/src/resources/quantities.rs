use crate::{PodfitError, Result};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube_quantity::ParsedQuantity;
use std::fmt;

const IEC_SUFFIXES: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Largest decimal exponent handed to the parser; i64 holds at most 19 digits
const MAX_EXPONENT: u32 = 18;

/// Integer value of a quantity, rounded up ("128Mi" -> 134217728, "100m" -> 1)
pub fn quantity_value(quantity: &Quantity) -> Result<i64> {
    parse_quantity(quantity).map(|v| round_up(v, 1.0))
}

/// Value in thousandths, rounded up ("1" -> 1000, "250m" -> 250). Used for CPU.
pub fn quantity_milli_value(quantity: &Quantity) -> Result<i64> {
    parse_quantity(quantity).map(|v| round_up(v, 1000.0))
}

fn parse_quantity(quantity: &Quantity) -> Result<f64> {
    if exponent_out_of_range(&quantity.0) {
        return Err(PodfitError::invalid_quantity(
            &quantity.0,
            format!("decimal exponent beyond +/-{}", MAX_EXPONENT),
        ));
    }

    let parsed = ParsedQuantity::try_from(quantity.0.as_str())
        .map_err(|e| PodfitError::invalid_quantity(&quantity.0, format!("{:?}", e)))?;

    parsed
        .to_bytes_f64()
        .ok_or_else(|| PodfitError::invalid_quantity(&quantity.0, "value out of range"))
}

/// True for `<number>e<exponent>` forms whose exponent is not a small integer
fn exponent_out_of_range(value: &str) -> bool {
    let Some(pos) = value.find(['e', 'E']) else {
        return false;
    };
    let digits = value[pos + 1..].trim_start_matches(['+', '-']);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        // Not an exponent ("1Ei" style suffixes); leave it to the parser
        return false;
    }
    digits
        .parse::<u32>()
        .map_or(true, |exponent| exponent > MAX_EXPONENT)
}

/// `value * factor` rounded up, saturating at the i64 bounds.
///
/// Results within float noise of an integer snap to it, so "0.7" stays 700m.
fn round_up(value: f64, factor: f64) -> i64 {
    let scaled = value * factor;
    let nearest = scaled.round();
    let rounded = if (scaled - nearest).abs() <= 1e-9 * nearest.abs().max(1.0) {
        nearest
    } else {
        scaled.ceil()
    };
    // `as` saturates and maps NaN to zero
    rounded as i64
}

/// Render a byte count with IEC units: 9 -> "9 B", 1536 -> "1.5 KiB", 20480 -> "20 KiB"
pub fn format_iec_bytes(bytes: i64) -> String {
    let sign = if bytes < 0 { "-" } else { "" };
    let size = bytes.unsigned_abs();

    if size < 10 {
        return format!("{}{} B", sign, size);
    }

    let mut exponent = 0;
    let mut unit: u64 = 1;
    while exponent + 1 < IEC_SUFFIXES.len() && size / unit >= 1024 {
        unit *= 1024;
        exponent += 1;
    }

    let value = (size as f64 / unit as f64 * 10.0 + 0.5).floor() / 10.0;
    if value < 10.0 {
        format!("{}{:.1} {}", sign, value, IEC_SUFFIXES[exponent])
    } else {
        format!("{}{:.0} {}", sign, value, IEC_SUFFIXES[exponent])
    }
}

/// Milli-CPU rendered as raw millis plus whole cores: "3000 (3)"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanCpu(pub i64);

impl fmt::Display for HumanCpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.0 / 1000)
    }
}

/// Bytes rendered as the raw count plus IEC form: "2097152 (2.0 MiB)"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanBytes(pub i64);

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, format_iec_bytes(self.0))
    }
}
