//! AVI 1.0 RIFF writer
//!
//! Layout:
//!
//! ```text
//! RIFF 'AVI '
//!   LIST 'hdrl'
//!     'avih'
//!     LIST 'strl' ('strh' vids, 'strf' BITMAPINFOHEADER)
//!     LIST 'strl' ('strh' auds, 'strf' WAVEFORMATEX)
//!   LIST 'movi'
//!     '00db' | '01wb' ...
//!   'idx1'
//! ```
//!
//! The header has a fixed size for a given format, so it is written with
//! zero counts up front and rewritten in place once the totals are known.

use std::io::{self, Seek, SeekFrom, Write};

use crate::domain::media::{AudioFormat, VideoFormat, VideoFrame, BYTES_PER_PIXEL};

const VIDEO_CHUNK: [u8; 4] = *b"00db";
const AUDIO_CHUNK: [u8; 4] = *b"01wb";

const AVIF_HASINDEX: u32 = 0x10;
const AVIF_ISINTERLEAVED: u32 = 0x100;
const AVIIF_KEYFRAME: u32 = 0x10;

/// Bytes per `idx1` entry
const INDEX_ENTRY_LEN: u64 = 16;

/// Counts patched into the header at finish
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    riff_size: u32,
    movi_size: u32,
    video_frames: u32,
    audio_blocks: u32,
}

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    id: [u8; 4],
    flags: u32,
    offset: u32,
    size: u32,
}

/// Streams an uncompressed 24-bit video track and a PCM audio track.
pub struct AviWriter<W: Write + Seek> {
    out: W,
    video: VideoFormat,
    audio: AudioFormat,
    header_len: u64,
    position: u64,
    index: Vec<IndexEntry>,
    video_frames: u32,
    audio_bytes: u64,
    frame_buf: Vec<u8>,
}

impl<W: Write + Seek> AviWriter<W> {
    /// Write the initial header to `out`
    pub fn new(mut out: W, video: VideoFormat, audio: AudioFormat) -> io::Result<Self> {
        let empty = build_header(&video, &audio, Totals::default());
        let header_len = empty.len() as u64;
        let header = build_header(
            &video,
            &audio,
            Totals {
                riff_size: (header_len - 8) as u32,
                movi_size: 4,
                ..Totals::default()
            },
        );
        out.write_all(&header)?;

        Ok(Self {
            out,
            video,
            audio,
            header_len,
            position: header_len,
            index: Vec::new(),
            video_frames: 0,
            audio_bytes: 0,
            frame_buf: Vec::with_capacity(dib_frame_len(&video)),
        })
    }

    /// Format of the video stream
    pub fn video_format(&self) -> &VideoFormat {
        &self.video
    }

    /// Frames written so far
    pub fn video_frames(&self) -> u32 {
        self.video_frames
    }

    /// PCM bytes written so far, excluding chunk headers and padding
    pub fn audio_bytes(&self) -> u64 {
        self.audio_bytes
    }

    /// Append PCM to the audio track
    pub fn write_audio(&mut self, pcm: &[u8]) -> io::Result<()> {
        self.write_chunk(AUDIO_CHUNK, 0, pcm)?;
        self.audio_bytes += pcm.len() as u64;
        Ok(())
    }

    /// Append one frame to the video track.
    ///
    /// # Returns
    /// Bytes added to the file, chunk header included
    pub fn write_frame(&mut self, frame: &VideoFrame) -> io::Result<usize> {
        if !frame.matches(&self.video) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "frame is {}x{}, stream is {}x{}",
                    frame.width(),
                    frame.height(),
                    self.video.width(),
                    self.video.height()
                ),
            ));
        }

        let mut buf = std::mem::take(&mut self.frame_buf);
        fill_dib(frame, &mut buf);
        let written = self.write_chunk(VIDEO_CHUNK, AVIIF_KEYFRAME, &buf);
        self.frame_buf = buf;

        let written = written?;
        self.video_frames += 1;
        Ok(written)
    }

    /// Write the index, patch the header and return the output
    pub fn finish(mut self) -> io::Result<W> {
        let index_len = 8 + self.index.len() as u64 * INDEX_ENTRY_LEN;
        let end = self.position + index_len;
        let riff_size = size_field(end - 8)?;

        let mut idx1 = Vec::with_capacity(index_len as usize);
        idx1.extend_from_slice(b"idx1");
        idx1.extend_from_slice(&((index_len - 8) as u32).to_le_bytes());
        for entry in &self.index {
            idx1.extend_from_slice(&entry.id);
            put_u32s(&mut idx1, &[entry.flags, entry.offset, entry.size]);
        }
        self.out.write_all(&idx1)?;

        let totals = Totals {
            riff_size,
            movi_size: size_field(self.position - self.movi_start())?,
            video_frames: self.video_frames,
            audio_blocks: (self.audio_bytes / u64::from(self.audio.block_align())) as u32,
        };
        self.out.seek(SeekFrom::Start(0))?;
        self.out
            .write_all(&build_header(&self.video, &self.audio, totals))?;
        self.out.seek(SeekFrom::Start(end))?;
        self.out.flush()?;

        Ok(self.out)
    }

    /// Offset of the 'movi' fourcc; index offsets count from here
    fn movi_start(&self) -> u64 {
        self.header_len - 4
    }

    fn write_chunk(&mut self, id: [u8; 4], flags: u32, data: &[u8]) -> io::Result<usize> {
        let padded = data.len() + data.len() % 2;
        let chunk_len = 8 + padded as u64;
        // Leave room for this chunk's index entry and the idx1 header
        let index_len = 8 + (self.index.len() as u64 + 1) * INDEX_ENTRY_LEN;
        size_field(self.position + chunk_len + index_len - 8)?;

        let entry = IndexEntry {
            id,
            flags,
            offset: (self.position - self.movi_start()) as u32,
            size: data.len() as u32,
        };

        self.out.write_all(&id)?;
        self.out.write_all(&entry.size.to_le_bytes())?;
        self.out.write_all(data)?;
        if padded != data.len() {
            self.out.write_all(&[0])?;
        }

        self.index.push(entry);
        self.position += chunk_len;
        Ok(chunk_len as usize)
    }
}

/// RIFF sizes are 32-bit; refuse to grow past them
fn size_field(len: u64) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::Other,
            "recording exceeds the 4 GiB AVI size limit",
        )
    })
}

/// Bytes in one bottom-up BGR frame with rows padded to 4 bytes
fn dib_frame_len(video: &VideoFormat) -> usize {
    dib_stride(video.width()) * video.height() as usize
}

fn dib_stride(width: u32) -> usize {
    (width as usize * BYTES_PER_PIXEL + 3) & !3
}

/// Convert top-down RGB into bottom-up BGR rows
fn fill_dib(frame: &VideoFrame, buf: &mut Vec<u8>) {
    let stride = dib_stride(frame.width());
    buf.clear();
    for y in (0..frame.height()).rev() {
        let row_start = buf.len();
        for rgb in frame.row(y).chunks_exact(BYTES_PER_PIXEL) {
            buf.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
        }
        buf.resize(row_start + stride, 0);
    }
}

fn put_u32s(buf: &mut Vec<u8>, values: &[u32]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn put_u16s(buf: &mut Vec<u8>, values: &[u16]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + body.len() + 1);
    out.extend_from_slice(id);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn list(kind: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    let mut body = kind.to_vec();
    for child in children {
        body.extend_from_slice(child);
    }
    chunk(b"LIST", &body)
}

fn build_header(video: &VideoFormat, audio: &AudioFormat, totals: Totals) -> Vec<u8> {
    let frame_len = dib_frame_len(video) as u32;
    let fps = video.fps();
    let audio_buffer = audio.byte_rate().div_ceil(fps);
    let (width, height) = (video.width(), video.height());
    let rect = [
        0,
        0,
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
    ];

    let mut avih = Vec::with_capacity(56);
    put_u32s(
        &mut avih,
        &[
            1_000_000 / fps,
            frame_len.saturating_mul(fps).saturating_add(audio.byte_rate()),
            0,
            AVIF_HASINDEX | AVIF_ISINTERLEAVED,
            totals.video_frames,
            0,
            2,
            frame_len,
            width,
            height,
            0,
            0,
            0,
            0,
        ],
    );

    let mut vids = b"vidsDIB ".to_vec();
    put_u32s(&mut vids, &[0, 0, 0, 1, fps, 0, totals.video_frames, frame_len, u32::MAX, 0]);
    put_u16s(&mut vids, &rect);

    let mut bitmap = Vec::with_capacity(40);
    put_u32s(&mut bitmap, &[40, width, height]);
    put_u16s(&mut bitmap, &[1, 24]);
    put_u32s(&mut bitmap, &[0, frame_len, 0, 0, 0, 0]);

    let block_align = u32::from(audio.block_align());
    let mut auds = b"auds".to_vec();
    put_u32s(
        &mut auds,
        &[
            0,
            0,
            0,
            0,
            block_align,
            audio.byte_rate(),
            0,
            totals.audio_blocks,
            audio_buffer,
            u32::MAX,
            block_align,
        ],
    );
    put_u16s(&mut auds, &[0; 4]);

    let mut wave = Vec::with_capacity(18);
    put_u16s(&mut wave, &[1, audio.channels()]);
    put_u32s(&mut wave, &[audio.sample_rate(), audio.byte_rate()]);
    put_u16s(&mut wave, &[audio.block_align(), audio.bits_per_sample(), 0]);

    let hdrl = list(
        b"hdrl",
        &[
            chunk(b"avih", &avih),
            list(b"strl", &[chunk(b"strh", &vids), chunk(b"strf", &bitmap)]),
            list(b"strl", &[chunk(b"strh", &auds), chunk(b"strf", &wave)]),
        ],
    );

    let mut out = Vec::with_capacity(12 + hdrl.len() + 12);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&totals.riff_size.to_le_bytes());
    out.extend_from_slice(b"AVI ");
    out.extend_from_slice(&hdrl);
    out.extend_from_slice(b"LIST");
    out.extend_from_slice(&totals.movi_size.to_le_bytes());
    out.extend_from_slice(b"movi");
    out
}
