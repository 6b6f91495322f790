//! Magic-byte classification of fetched media payloads.
//!
//! Provider endpoints lie: error pages arrive with 200 status, and free
//! tiers return placeholder JPEGs where video was requested. Classification
//! therefore never trusts content-type headers, only the payload's own
//! leading bytes.

use astro_models::media::{MediaKind, MIN_MEDIA_BYTES, PROBABLE_VIDEO_BYTES};

use crate::error::{MediaError, MediaResult};

/// Classify a payload by its leading signature bytes.
pub fn sniff_kind(bytes: &[u8]) -> MediaKind {
    if bytes.len() < 12 {
        return MediaKind::Unknown;
    }

    // Video containers
    if bytes[4..8] == *b"ftyp" {
        // ISO-BMFF: MP4, MOV, M4V
        return MediaKind::Video;
    }
    if bytes.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        // EBML: WebM, MKV
        return MediaKind::Video;
    }
    if bytes.starts_with(b"RIFF") && bytes[8..12] == *b"AVI " {
        return MediaKind::Video;
    }
    if bytes.starts_with(b"OggS") {
        return MediaKind::Video;
    }

    // Image containers
    if bytes.starts_with(&[0xFF, 0xD8]) {
        // JPEG
        return MediaKind::Image;
    }
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        // PNG
        return MediaKind::Image;
    }
    if bytes.starts_with(b"GIF") {
        return MediaKind::Image;
    }
    if bytes.starts_with(b"RIFF") && bytes[8..12] == *b"WEBP" {
        return MediaKind::Image;
    }

    MediaKind::Unknown
}

/// Accept a payload as video or say exactly why not.
///
/// Unknown signatures pass only above [`PROBABLE_VIDEO_BYTES`]; anything
/// that sniffs as an image is refused regardless of size.
pub fn validate_video(bytes: &[u8]) -> MediaResult<()> {
    if bytes.len() < MIN_MEDIA_BYTES {
        return Err(MediaError::TooSmall(bytes.len()));
    }

    match sniff_kind(bytes) {
        MediaKind::Video => Ok(()),
        MediaKind::Image => Err(MediaError::NotVideo(MediaKind::Image)),
        MediaKind::Unknown => {
            if bytes.len() > PROBABLE_VIDEO_BYTES {
                Ok(())
            } else {
                Err(MediaError::UnknownSignature(bytes.len()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(header: &[u8], len: usize) -> Vec<u8> {
        let mut bytes = header.to_vec();
        bytes.resize(len.max(header.len()), 0);
        bytes
    }

    fn mp4_header() -> Vec<u8> {
        // [box size][ftyp][brand]
        let mut b = vec![0x00, 0x00, 0x00, 0x20];
        b.extend_from_slice(b"ftypisom");
        b
    }

    #[test]
    fn test_mp4_sniffs_as_video() {
        assert_eq!(sniff_kind(&padded(&mp4_header(), 64)), MediaKind::Video);
    }

    #[test]
    fn test_webm_sniffs_as_video() {
        let webm = padded(&[0x1A, 0x45, 0xDF, 0xA3], 64);
        assert_eq!(sniff_kind(&webm), MediaKind::Video);
    }

    #[test]
    fn test_ogg_sniffs_as_video() {
        assert_eq!(sniff_kind(&padded(b"OggS\x00\x02", 64)), MediaKind::Video);
    }

    #[test]
    fn test_avi_and_webp_share_riff_prefix() {
        let avi = padded(b"RIFF\x24\x00\x00\x00AVI LIST", 2000);
        assert_eq!(sniff_kind(&avi), MediaKind::Video);

        let webp = padded(b"RIFF\x24\x00\x00\x00WEBPVP8 ", 2000);
        assert_eq!(sniff_kind(&webp), MediaKind::Image);
    }

    #[test]
    fn test_png_and_gif_sniff_as_images() {
        assert_eq!(
            sniff_kind(&padded(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A], 64)),
            MediaKind::Image
        );
        assert_eq!(sniff_kind(&padded(b"GIF89a", 64)), MediaKind::Image);
    }

    #[test]
    fn test_jpeg_rejected_for_video_at_any_size() {
        let jpeg = padded(&[0xFF, 0xD8, 0xFF, 0xE0], 600_000);
        assert_eq!(sniff_kind(&jpeg), MediaKind::Image);
        assert!(matches!(
            validate_video(&jpeg),
            Err(MediaError::NotVideo(MediaKind::Image))
        ));
    }

    #[test]
    fn test_tiny_payload_rejected_before_sniffing() {
        let clip = padded(&mp4_header(), 999);
        assert!(matches!(
            validate_video(&clip),
            Err(MediaError::TooSmall(999))
        ));
    }

    #[test]
    fn test_unknown_signature_needs_bulk() {
        let small = padded(&[0x00, 0x01, 0x02, 0x03], 10_000);
        assert!(matches!(
            validate_video(&small),
            Err(MediaError::UnknownSignature(10_000))
        ));

        let large = padded(&[0x00, 0x01, 0x02, 0x03], 600_000);
        assert!(validate_video(&large).is_ok());
    }

    #[test]
    fn test_valid_mp4_passes_validation() {
        assert!(validate_video(&padded(&mp4_header(), 50_000)).is_ok());
    }
}
