//! QR Encoder — deterministic PNG rendering of a share payload.
//!
//! Module sizing and quiet zone are fixed defaults; payloads beyond the
//! symbol's practical capacity surface the encoder's own error. Scannability
//! of very long payloads is an accepted limitation, not a defect.

use image::Luma;
use qrcode::QrCode;

use crate::errors::PoemError;

/// Pixels per QR module.
const MODULE_PX: u32 = 4;

/// Encodes the payload as a QR symbol and returns PNG bytes.
pub fn encode_qr_png(payload: &str) -> Result<Vec<u8>, PoemError> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| PoemError::Unknown(format!("QR encoding failed: {e}")))?;

    let rendered = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .build();

    let mut png = Vec::new();
    image::DynamicImage::ImageLuma8(rendered)
        .write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageFormat::Png,
        )
        .map_err(|e| PoemError::Unknown(format!("QR image encoding failed: {e}")))?;

    Ok(png)
}
