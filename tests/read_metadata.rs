// End-to-end reads of synthetic MP3 and FLAC files

use std::fs;
use std::path::PathBuf;

use tagprobe::{probe, read_audio_metadata, AudioFormat, MetadataError, MetadataRecord};
use tempfile::TempDir;

fn synchsafe(size: u32) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}

fn id3_tag(frames: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (id, text) in frames {
        let mut payload = vec![0x00];
        payload.extend_from_slice(text.as_bytes());
        payload.push(0);
        body.extend_from_slice(id.as_bytes());
        body.extend_from_slice(&synchsafe(payload.len() as u32));
        body.extend_from_slice(&[0, 0]);
        body.extend(payload);
    }
    body.extend([0u8; 64]);
    let mut tag = b"ID3\x03\x00\x00".to_vec();
    tag.extend_from_slice(&synchsafe(body.len() as u32));
    tag.extend(body);
    tag
}

// MPEG-1 Layer III, 128 kbps, 44.1 kHz
fn mpeg_frames(count: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..count {
        let mut frame = vec![0xFF, 0xFB, 0x90, 0x64];
        frame.resize(417, 0x00);
        out.extend(frame);
    }
    out
}

fn flac_block(kind: u8, last: bool, payload: &[u8]) -> Vec<u8> {
    let len = payload.len() as u32;
    let flag = if last { 0x80 } else { 0x00 };
    let mut out = vec![kind | flag, (len >> 16) as u8, (len >> 8) as u8, len as u8];
    out.extend_from_slice(payload);
    out
}

fn flac_file(sample_rate: u32, total_samples: u32, comments: &[&str]) -> Vec<u8> {
    let mut info = vec![0u8; 34];
    info[10] = (sample_rate >> 12) as u8;
    info[11] = (sample_rate >> 4) as u8;
    info[12] = ((sample_rate & 0x0F) as u8) << 4 | 0x02;
    info[13] = 0xF0;
    info[14..18].copy_from_slice(&total_samples.to_be_bytes());

    let vendor = b"synthetic";
    let mut vorbis = (vendor.len() as u32).to_le_bytes().to_vec();
    vorbis.extend_from_slice(vendor);
    vorbis.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for c in comments {
        vorbis.extend_from_slice(&(c.len() as u32).to_le_bytes());
        vorbis.extend_from_slice(c.as_bytes());
    }

    let mut out = b"fLaC".to_vec();
    out.extend(flac_block(0, false, &info));
    out.extend(flac_block(4, true, &vorbis));
    // Stand-in for audio frames
    out.extend([0xFFu8, 0xF8, 0x69, 0x08].repeat(64));
    out
}

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn mp3_tags_duration_and_bitrate() {
    let dir = TempDir::new().unwrap();
    let mut bytes = id3_tag(&[
        ("TIT2", "Ain't No Rest"),
        ("TPE1", "Early Artist"),
        ("TALB", "Album"),
        ("TYER", "2008"),
        ("TRCK", "1"),
        ("TCON", "Rock"),
        ("TPE1", "Final Artist"),
    ]);
    bytes.extend(mpeg_frames(100));
    let path = write(&dir, "song.mp3", &bytes);

    let record = read_audio_metadata(&path);
    assert_eq!(record.title, "Ain't No Rest");
    assert_eq!(record.artist, "Final Artist");
    assert_eq!(record.album, "Album");
    assert_eq!(record.year, "2008");
    assert_eq!(record.track, "1");
    assert_eq!(record.genre, "Rock");
    assert_eq!(record.bitrate, 128);
    let expected = 100.0 * 1152.0 / 44100.0;
    assert!((record.duration - expected).abs() < 1e-9);
}

#[test]
fn flac_comments_and_statistics() {
    let dir = TempDir::new().unwrap();
    let bytes = flac_file(
        44100,
        44100 * 3,
        &["title=Lower", "ARTIST=Foo", "Date=2020", "TRACKNUMBER=7", "GENRE=Folk", "ALBUM=LP"],
    );
    let path = write(&dir, "track.flac", &bytes);

    let report = probe(&path).unwrap();
    assert_eq!(report.format, AudioFormat::Flac);
    assert!(report.is_clean());
    let record = report.record;
    assert_eq!(record.title, "Lower");
    assert_eq!(record.artist, "Foo");
    assert_eq!(record.year, "2020");
    assert_eq!(record.track, "7");
    assert_eq!(record.genre, "Folk");
    assert_eq!(record.album, "LP");
    assert_eq!(record.duration, 3.0);
    let expected_kbps = (bytes.len() as f64 * 8.0 / 3000.0) as u32;
    assert_eq!(record.bitrate, expected_kbps);
}

#[test]
fn missing_magic_gives_empty_record() {
    let dir = TempDir::new().unwrap();
    let mp3 = write(&dir, "raw.mp3", &mpeg_frames(5));
    let flac = write(&dir, "fake.flac", b"RIFF\x00\x00\x00\x00WAVE");

    for path in [&mp3, &flac] {
        let record = read_audio_metadata(path);
        assert_eq!(record, MetadataRecord::default());
        assert!(matches!(probe(path), Err(MetadataError::Format { .. })));
    }
}

#[test]
fn unsupported_extension_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let mut bytes = id3_tag(&[("TIT2", "Hidden")]);
    bytes.extend(mpeg_frames(3));
    let upper = write(&dir, "song.MP3", &bytes);
    let other = write(&dir, "song.ogg", &bytes);

    for path in [&upper, &other] {
        let report = probe(path).unwrap();
        assert_eq!(report.format, AudioFormat::Unknown);
        assert!(report.record.is_empty());
        assert!(read_audio_metadata(path).is_empty());
    }
}

#[test]
fn tag_larger_than_file_is_bounded() {
    let dir = TempDir::new().unwrap();
    let mut bytes = b"ID3\x04\x00\x00".to_vec();
    bytes.extend_from_slice(&synchsafe(100_000));
    let payload = b"\x00Readable\0";
    bytes.extend_from_slice(b"TIT2");
    bytes.extend_from_slice(&synchsafe(payload.len() as u32));
    bytes.extend_from_slice(&[0, 0]);
    bytes.extend_from_slice(payload);
    // Second frame cut mid-payload
    bytes.extend_from_slice(b"TPE1");
    bytes.extend_from_slice(&synchsafe(50));
    bytes.extend_from_slice(&[0, 0]);
    bytes.extend_from_slice(b"\x00Cut off");
    let path = write(&dir, "short.mp3", &bytes);

    let report = probe(&path).unwrap();
    assert_eq!(report.record.title, "Readable");
    assert_eq!(report.record.artist, "");
    assert_eq!(report.record.duration, 0.0);
    assert!(report
        .issues
        .iter()
        .any(|e| matches!(e, MetadataError::TruncatedData { .. })));

    assert_eq!(read_audio_metadata(&path).title, "Readable");
}

#[test]
fn frame_overrunning_tag_keeps_earlier_fields() {
    let dir = TempDir::new().unwrap();
    let mut tag = id3_tag(&[("TALB", "Before"), ("TIT2", "After")]);
    // Point the TIT2 size past the end of the tag
    let tit2 = tag.windows(4).position(|w| w == b"TIT2").unwrap();
    tag[tit2 + 4..tit2 + 8].copy_from_slice(&synchsafe(10_000));
    tag.extend(mpeg_frames(2));
    let path = write(&dir, "bad.mp3", &tag);

    let report = probe(&path).unwrap();
    assert_eq!(report.record.album, "Before");
    assert_eq!(report.record.title, "");
    assert!(matches!(
        report.issues[..],
        [MetadataError::MalformedFrame { .. }]
    ));
    // Audio after the tag is still scanned
    assert_eq!(report.record.bitrate, 128);
}

#[test]
fn reparsing_is_stable() {
    let dir = TempDir::new().unwrap();
    let mut bytes = id3_tag(&[("TIT2", "Same")]);
    bytes.extend(mpeg_frames(7));
    let mp3 = write(&dir, "a.mp3", &bytes);
    let flac = write(&dir, "b.flac", &flac_file(48000, 96000, &["TITLE=Same"]));

    for path in [&mp3, &flac] {
        let before = fs::read(path).unwrap();
        let first = read_audio_metadata(path);
        let second = read_audio_metadata(path);
        assert_eq!(first, second);
        assert_eq!(first.duration.to_bits(), second.duration.to_bits());
        assert_eq!(fs::read(path).unwrap(), before);
    }
}

#[test]
fn missing_file_reports_open_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.flac");
    assert!(matches!(probe(&path), Err(MetadataError::FileOpen { .. })));
    assert!(read_audio_metadata(&path).is_empty());
}

#[test]
fn empty_vorbis_value_clears_field() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "blank.flac", &flac_file(44100, 44100, &["TITLE=First", "TITLE="]));

    let report = probe(&path).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.record.title, "");
    assert_eq!(report.record.duration, 1.0);
}

#[test]
fn short_id3_header_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "stub.mp3", b"ID3\x04\x00");

    let report = probe(&path).unwrap();
    assert_eq!(report.format, AudioFormat::Mp3);
    assert!(report.record.is_empty());
    assert!(matches!(
        report.issues[..],
        [MetadataError::TruncatedData { expected: 10, found: 5, .. }]
    ));
    assert!(read_audio_metadata(&path).is_empty());
}
