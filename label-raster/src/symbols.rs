//! Symbol encoding
//!
//! Thin wrappers around the `qrcode` and `barcoders` encoders that return
//! plain module matrices/bars. Encode failures are reported as `None` so
//! the renderer can leave the region blank instead of failing the page.

use tracing::warn;

/// Encoded QR symbol: square module matrix, row-major, true = dark
pub struct QrMatrix {
    pub width: usize,
    pub modules: Vec<bool>,
}

/// Encode a payload as a QR symbol
///
/// Returns `None` for empty payloads or encoder errors (oversized data,
/// unsupported content) — never panics.
pub fn qr_matrix(payload: &str) -> Option<QrMatrix> {
    if payload.is_empty() {
        return None;
    }

    let code = match qrcode::QrCode::new(payload.as_bytes()) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, len = payload.len(), "QR encode failed, leaving region blank");
            return None;
        }
    };

    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    Some(QrMatrix { width, modules })
}

/// Encode a payload as Code 128 bars (true = bar, false = space)
///
/// Code 128 requires a character-set prefix:
/// - Character Set A (Ā): uppercase, control chars, digits
/// - Character Set B (Ɓ): uppercase, lowercase, digits, special chars
/// - Character Set C (Ć): digit pairs only (high density)
/// Set B covers the serial payload alphabet used on these labels.
pub fn code128_bars(payload: &str) -> Option<Vec<bool>> {
    if payload.is_empty() {
        return None;
    }

    let prefixed = format!("\u{0181}{}", payload);
    let barcode = match barcoders::sym::code128::Code128::new(&prefixed) {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "Code 128 encode failed, leaving region blank");
            return None;
        }
    };

    Some(barcode.encode().into_iter().map(|m| m == 1).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_matrix_square() {
        let qr = qr_matrix("S1IPM1002PA01-001").unwrap();
        assert_eq!(qr.modules.len(), qr.width * qr.width);
        // Finder patterns mean the symbol always has dark modules
        assert!(qr.modules.iter().any(|&m| m));
        assert!(qr.modules.iter().any(|&m| !m));
    }

    #[test]
    fn test_qr_empty_payload() {
        assert!(qr_matrix("").is_none());
    }

    #[test]
    fn test_code128_bars() {
        let bars = code128_bars("S1IPM1002PA01-001").unwrap();
        // Symbols start with a bar and end with a bar (stop pattern)
        assert_eq!(bars.first(), Some(&true));
        assert_eq!(bars.last(), Some(&true));
        assert!(bars.len() > 30);
    }

    #[test]
    fn test_code128_empty_payload() {
        assert!(code128_bars("").is_none());
    }

    #[test]
    fn test_code128_deterministic() {
        assert_eq!(code128_bars("ABC-123"), code128_bars("ABC-123"));
    }
}
