//! Concatenation of synthesized clips into the final episode.

use super::{AudioClip, PodcastAudio};
use crate::error::{CastwrightError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Size of an ID3v2 header (and footer, when present).
const ID3V2_HEADER_LEN: usize = 10;
/// Size of a trailing ID3v1 tag.
const ID3V1_TAG_LEN: usize = 128;

/// Layer III bitrates in kbit/s by header index, MPEG-1 then MPEG-2/2.5.
const BITRATES_V1: [u32; 15] = [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];
const BITRATES_V2: [u32; 15] = [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160];

/// Sample rates in Hz by header index for MPEG-1, MPEG-2 and MPEG-2.5.
const SAMPLE_RATES_V1: [u32; 3] = [44100, 48000, 32000];
const SAMPLE_RATES_V2: [u32; 3] = [22050, 24000, 16000];
const SAMPLE_RATES_V25: [u32; 3] = [11025, 12000, 8000];

/// VBRI headers sit at a fixed offset after the frame header.
const VBRI_OFFSET: usize = 36;

/// Joins MP3 clips end to end and writes the episode.
#[derive(Debug, Clone, Default)]
pub struct AudioAssembler {
    reencode: bool,
}

impl AudioAssembler {
    pub fn new(reencode: bool) -> Self {
        Self { reencode }
    }

    /// Concatenate `clips` in index order and export to `output`.
    ///
    /// With re-encoding enabled the joined stream is written to `work_dir`
    /// first and passed through ffmpeg.
    #[instrument(skip(self, clips, work_dir), fields(clips = clips.len(), output = %output.display()))]
    pub async fn assemble(
        &self,
        clips: &[AudioClip],
        output: &Path,
        work_dir: &Path,
    ) -> Result<PodcastAudio> {
        let mut ordered: Vec<&AudioClip> = clips.iter().collect();
        ordered.sort_by_key(|clip| clip.index);

        let mut combined = Vec::new();
        for clip in &ordered {
            let data = tokio::fs::read(&clip.path).await?;
            let frames = clip_frames(&data);
            debug!("Appending clip {} ({} bytes)", clip.index, frames.len());
            combined.extend_from_slice(frames);
        }

        if ordered.is_empty() {
            warn!("No audio clips were produced; writing an empty file");
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        if self.reencode && !combined.is_empty() {
            let joined = work_dir.join("combined.mp3");
            tokio::fs::write(&joined, &combined).await?;
            export_reencoded(&joined, output).await?;
        } else {
            tokio::fs::write(output, &combined).await?;
        }

        let bytes = tokio::fs::metadata(output).await?.len();
        info!("Exported {} clips to {} ({} bytes)", ordered.len(), output.display(), bytes);

        Ok(PodcastAudio {
            path: output.to_path_buf(),
            clip_count: ordered.len(),
            bytes,
        })
    }
}

/// Audio frames of a clip, ready to be appended to the episode.
///
/// Drops ID3 tags and the leading Xing/Info/VBRI frame, whose frame count and
/// seek table only describe the clip itself.
pub fn clip_frames(data: &[u8]) -> &[u8] {
    strip_vbr_header(strip_id3_tags(data))
}

/// Return the MP3 frame data of a clip without leading ID3v2 or trailing ID3v1 tags.
fn strip_id3_tags(data: &[u8]) -> &[u8] {
    let mut start = 0;
    if data.len() >= ID3V2_HEADER_LEN && &data[..3] == b"ID3" {
        // Tag size is a 28-bit syncsafe integer
        let size = data[6..10]
            .iter()
            .fold(0usize, |acc, b| (acc << 7) | (*b & 0x7f) as usize);
        let footer = if data[5] & 0x10 != 0 { ID3V2_HEADER_LEN } else { 0 };
        start = (ID3V2_HEADER_LEN + size + footer).min(data.len());
    }

    let rest = &data[start..];
    if rest.len() >= ID3V1_TAG_LEN && &rest[rest.len() - ID3V1_TAG_LEN..][..3] == b"TAG" {
        &rest[..rest.len() - ID3V1_TAG_LEN]
    } else {
        rest
    }
}

/// Length and Xing/Info tag offset of a Layer III frame starting at `data[0]`.
fn layer3_frame(data: &[u8]) -> Option<(usize, usize)> {
    let header = data.get(..4)?;
    if header[0] != 0xff || header[1] & 0xe0 != 0xe0 {
        return None;
    }

    let version = (header[1] >> 3) & 0x03;
    let layer = (header[1] >> 1) & 0x03;
    if layer != 0x01 || version == 0x01 {
        return None;
    }
    let mpeg1 = version == 0x03;

    let bitrate_index = (header[2] >> 4) as usize;
    let rate_index = ((header[2] >> 2) & 0x03) as usize;
    if bitrate_index == 0 || bitrate_index == 0x0f || rate_index == 0x03 {
        return None;
    }

    let bitrates = if mpeg1 { &BITRATES_V1 } else { &BITRATES_V2 };
    let sample_rates = match version {
        0x03 => &SAMPLE_RATES_V1,
        0x02 => &SAMPLE_RATES_V2,
        _ => &SAMPLE_RATES_V25,
    };
    let bitrate = bitrates[bitrate_index] * 1000;
    let sample_rate = sample_rates[rate_index];
    let padding = ((header[2] >> 1) & 0x01) as u32;
    let coefficient = if mpeg1 { 144 } else { 72 };
    let frame_len = (coefficient * bitrate / sample_rate + padding) as usize;

    let mono = header[3] >> 6 == 0x03;
    let side_info = match (mpeg1, mono) {
        (true, false) => 32,
        (true, true) | (false, false) => 17,
        (false, true) => 9,
    };
    let crc = if header[1] & 0x01 == 0 { 2 } else { 0 };

    Some((frame_len, 4 + crc + side_info))
}

/// Drop the first frame when it is a Xing, Info or VBRI header frame.
fn strip_vbr_header(data: &[u8]) -> &[u8] {
    let Some((frame_len, tag_offset)) = layer3_frame(data) else {
        return data;
    };

    let has_tag = |offset: usize, tag: &[u8]| data.get(offset..offset + tag.len()) == Some(tag);
    let vbr_header = has_tag(tag_offset, b"Xing")
        || has_tag(tag_offset, b"Info")
        || has_tag(VBRI_OFFSET, b"VBRI");

    if vbr_header {
        &data[frame_len.min(data.len())..]
    } else {
        data
    }
}

/// Write the joined stream to `dest` through ffmpeg/libmp3lame.
async fn export_reencoded(joined: &Path, dest: &Path) -> Result<()> {
    debug!("Re-encoding episode {:?} into {:?}", joined, dest);

    let result = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
        .arg(joined)
        .args(["-map_metadata", "-1", "-vn", "-codec:a", "libmp3lame", "-qscale:a", "2"])
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(CastwrightError::Audio(format!(
            "Failed to re-encode episode export {}: {}",
            dest.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CastwrightError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(CastwrightError::Audio(format!(
            "Could not start ffmpeg for episode export {}: {}",
            dest.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn id3v2(payload_len: usize) -> Vec<u8> {
        let mut tag = vec![b'I', b'D', b'3', 4, 0, 0];
        tag.extend_from_slice(&[
            ((payload_len >> 21) & 0x7f) as u8,
            ((payload_len >> 14) & 0x7f) as u8,
            ((payload_len >> 7) & 0x7f) as u8,
            (payload_len & 0x7f) as u8,
        ]);
        tag.extend(std::iter::repeat(0u8).take(payload_len));
        tag
    }

    fn clip(dir: &Path, index: usize, speaker: &str, data: &[u8]) -> AudioClip {
        let path: PathBuf = dir.join(format!("{}_{}.mp3", speaker, index));
        std::fs::write(&path, data).unwrap();
        AudioClip {
            index,
            speaker: speaker.to_string(),
            path,
        }
    }

    #[test]
    fn test_plain_data_untouched() {
        let data = [0xff, 0xfb, 0x90, 0x00, 1, 2, 3];
        assert_eq!(strip_id3_tags(&data), &data);
    }

    #[test]
    fn test_strips_id3v2_header() {
        let mut data = id3v2(300);
        data.extend_from_slice(&[0xff, 0xfb, 7, 7]);
        assert_eq!(strip_id3_tags(&data), &[0xff, 0xfb, 7, 7]);
    }

    #[test]
    fn test_strips_id3v1_trailer() {
        let mut data = vec![0xff, 0xfb, 1];
        let mut tag = b"TAG".to_vec();
        tag.resize(ID3V1_TAG_LEN, b' ');
        data.extend(tag);
        assert_eq!(strip_id3_tags(&data), &[0xff, 0xfb, 1]);
    }

    #[test]
    fn test_truncated_id3v2_yields_nothing() {
        let mut data = id3v2(0);
        data[9] = 0x7f;
        assert!(strip_id3_tags(&data).is_empty());
    }

    /// A 128 kbit/s 44.1 kHz MPEG-1 Layer III frame (417 bytes) with `tag` at `offset`.
    fn tagged_frame(channel_mode: u8, offset: usize, tag: &[u8]) -> Vec<u8> {
        let mut frame = vec![0xff, 0xfb, 0x90, channel_mode];
        frame.resize(417, 0);
        frame[offset..offset + tag.len()].copy_from_slice(tag);
        frame
    }

    #[test]
    fn test_drops_xing_frame() {
        let mut data = tagged_frame(0x00, 36, b"Xing");
        data.extend_from_slice(&[0xff, 0xfb, 0x90, 0x00, 9, 9]);
        assert_eq!(clip_frames(&data), &[0xff, 0xfb, 0x90, 0x00, 9, 9]);
    }

    #[test]
    fn test_drops_mono_info_frame_after_id3() {
        let mut data = id3v2(20);
        data.extend(tagged_frame(0xc0, 21, b"Info"));
        data.extend_from_slice(&[0xff, 0xfb, 0x90, 0xc0, 5]);
        assert_eq!(clip_frames(&data), &[0xff, 0xfb, 0x90, 0xc0, 5]);
    }

    #[test]
    fn test_drops_vbri_frame() {
        let mut data = tagged_frame(0x00, 36, b"VBRI");
        data.push(1);
        assert_eq!(clip_frames(&data), &[1]);
    }

    #[test]
    fn test_audio_frame_without_tag_is_kept() {
        let data = tagged_frame(0x00, 36, b"LAME");
        assert_eq!(clip_frames(&data), data.as_slice());
    }

    #[tokio::test]
    async fn test_assemble_drops_info_frame_of_every_clip() {
        let dir = tempfile::tempdir().unwrap();
        let first = [tagged_frame(0x00, 36, b"Info"), b"one".to_vec()].concat();
        let second = [tagged_frame(0x00, 36, b"Info"), b"two".to_vec()].concat();
        let clips = vec![
            clip(dir.path(), 0, "HOST1", &first),
            clip(dir.path(), 1, "HOST2", &second),
        ];
        let output = dir.path().join("episode.mp3");

        AudioAssembler::new(false)
            .assemble(&clips, &output, dir.path())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"onetwo");
    }

    #[tokio::test]
    async fn test_reencode_errors_name_episode_export() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_reencoded(
            &dir.path().join("missing.mp3"),
            &dir.path().join("episode.mp3"),
        )
        .await;

        match result {
            Err(CastwrightError::ToolNotFound(tool)) => assert_eq!(tool, "ffmpeg"),
            Err(CastwrightError::Audio(msg)) => assert!(msg.contains("episode export"), "{msg}"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_assemble_appends_in_index_order() {
        let dir = tempfile::tempdir().unwrap();
        let clips = vec![
            clip(dir.path(), 2, "HOST1", b"cc"),
            clip(dir.path(), 0, "HOST1", b"aa"),
            clip(dir.path(), 1, "HOST2", b"bb"),
        ];
        let output = dir.path().join("out").join("episode.mp3");

        let audio = AudioAssembler::new(false)
            .assemble(&clips, &output, dir.path())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"aabbcc");
        assert_eq!(audio.clip_count, 3);
        assert_eq!(audio.bytes, 6);
    }

    #[tokio::test]
    async fn test_assemble_empty_clip_list() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.mp3");

        let audio = AudioAssembler::new(true)
            .assemble(&[], &output, dir.path())
            .await
            .unwrap();

        assert_eq!(audio.clip_count, 0);
        assert_eq!(std::fs::metadata(&output).unwrap().len(), 0);
    }
}
