//! Decoder for the fixed-layout binary capture files.
//!
//! A capture is a 52-byte little-endian header followed by `sample_size`
//! little-endian `f32` samples. Nothing else may follow the payload.
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use crate::dsp::SignalError;
/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 52;
const SAMPLE_LEN: usize = 4;
/// Header fields, in wire order.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureHeader {
    pub channel_tag: [u8; 4],
    pub channel_count: i32,
    pub sample_size: i32,
    pub spectrum_lines_count: i32,
    pub slice_frequency: i32,
    pub frequency_resolution: f32,
    pub receive_time: f32,
    pub total_receive_time: i32,
    pub user_block_count: i32,
    pub data_size: i32,
    pub block_count: i32,
    /// Upper bound declared by the producer, not the true sample maximum.
    pub max_value: f32,
    /// Lower bound declared by the producer, not the true sample minimum.
    pub min_value: f32,
}
impl CaptureHeader {
    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut channel_tag = [0u8; 4];
        reader.read_exact(&mut channel_tag)?;
        Ok(Self {
            channel_tag,
            channel_count: reader.read_i32::<LittleEndian>()?,
            sample_size: reader.read_i32::<LittleEndian>()?,
            spectrum_lines_count: reader.read_i32::<LittleEndian>()?,
            slice_frequency: reader.read_i32::<LittleEndian>()?,
            frequency_resolution: reader.read_f32::<LittleEndian>()?,
            receive_time: reader.read_f32::<LittleEndian>()?,
            total_receive_time: reader.read_i32::<LittleEndian>()?,
            user_block_count: reader.read_i32::<LittleEndian>()?,
            data_size: reader.read_i32::<LittleEndian>()?,
            block_count: reader.read_i32::<LittleEndian>()?,
            max_value: reader.read_f32::<LittleEndian>()?,
            min_value: reader.read_f32::<LittleEndian>()?,
        })
    }
    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.channel_tag)?;
        writer.write_i32::<LittleEndian>(self.channel_count)?;
        writer.write_i32::<LittleEndian>(self.sample_size)?;
        writer.write_i32::<LittleEndian>(self.spectrum_lines_count)?;
        writer.write_i32::<LittleEndian>(self.slice_frequency)?;
        writer.write_f32::<LittleEndian>(self.frequency_resolution)?;
        writer.write_f32::<LittleEndian>(self.receive_time)?;
        writer.write_i32::<LittleEndian>(self.total_receive_time)?;
        writer.write_i32::<LittleEndian>(self.user_block_count)?;
        writer.write_i32::<LittleEndian>(self.data_size)?;
        writer.write_i32::<LittleEndian>(self.block_count)?;
        writer.write_f32::<LittleEndian>(self.max_value)?;
        writer.write_f32::<LittleEndian>(self.min_value)
    }
    /// Declared sample count; negative sizes are rejected.
    pub fn sample_count(&self) -> Result<usize, SignalError> {
        usize::try_from(self.sample_size).map_err(|_| {
            SignalError::MalformedRecord(format!(
                "negative sample size {}",
                self.sample_size
            ))
        })
    }
}
/// One decoded capture file. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureRecord {
    header: CaptureHeader,
    samples: Vec<f32>,
}
impl CaptureRecord {
    /// Builds a record from parts, checking that the header agrees with the payload.
    pub fn new(header: CaptureHeader, samples: Vec<f32>) -> Result<Self, SignalError> {
        let declared = header.sample_count()?;
        if declared != samples.len() {
            return Err(SignalError::MalformedRecord(format!(
                "header declares {declared} samples but {} were supplied",
                samples.len()
            )));
        }
        Ok(Self { header, samples })
    }
    /// Reads the source to completion and decodes it.
    pub fn decode<R: Read>(mut reader: R) -> Result<Self, SignalError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SignalError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let record = Self::decode(BufReader::new(file))?;
        debug!(
            "decoded {}: {} samples over {} s",
            path.display(),
            record.samples.len(),
            record.header.receive_time
        );
        Ok(record)
    }
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignalError> {
        if bytes.len() < HEADER_LEN {
            return Err(SignalError::MalformedRecord(format!(
                "expected a {HEADER_LEN}-byte header, got {} bytes",
                bytes.len()
            )));
        }
        let mut cursor = Cursor::new(bytes);
        let header = CaptureHeader::read_from(&mut cursor).map_err(truncated)?;
        let count = header.sample_count()?;
        let payload_len = bytes.len() - HEADER_LEN;
        let expected = count.checked_mul(SAMPLE_LEN).ok_or_else(|| {
            SignalError::MalformedRecord(format!("sample size {count} overflows"))
        })?;
        if payload_len < expected {
            return Err(SignalError::MalformedRecord(format!(
                "header declares {count} samples ({expected} bytes) but payload holds {payload_len} bytes"
            )));
        }
        if payload_len > expected {
            return Err(SignalError::MalformedRecord(format!(
                "{} trailing bytes after {count} samples",
                payload_len - expected
            )));
        }
        let mut samples = vec![0.0f32; count];
        cursor
            .read_f32_into::<LittleEndian>(&mut samples)
            .map_err(truncated)?;
        Ok(Self { header, samples })
    }
    /// Serializes the record back into the wire layout.
    pub fn encode(&self) -> Result<Vec<u8>, SignalError> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.samples.len() * SAMPLE_LEN);
        self.write_to(&mut out)?;
        Ok(out)
    }
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SignalError> {
        self.header.write_to(writer)?;
        for &sample in &self.samples {
            writer.write_f32::<LittleEndian>(sample)?;
        }
        Ok(())
    }
    pub fn header(&self) -> &CaptureHeader {
        &self.header
    }
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
    pub fn channel_tag(&self) -> [u8; 4] {
        self.header.channel_tag
    }
    pub fn receive_time(&self) -> f32 {
        self.header.receive_time
    }
    pub fn slice_frequency(&self) -> i32 {
        self.header.slice_frequency
    }
    pub fn max_value(&self) -> f32 {
        self.header.max_value
    }
    pub fn min_value(&self) -> f32 {
        self.header.min_value
    }
    /// Samples per second implied by the sample count and capture duration.
    pub fn sample_rate(&self) -> Result<f64, SignalError> {
        let receive_time = positive_receive_time(self.header.receive_time)?;
        Ok(self.samples.len() as f64 / receive_time)
    }
}
pub(crate) fn positive_receive_time(receive_time: f32) -> Result<f64, SignalError> {
    if receive_time.is_finite() && receive_time > 0.0 {
        Ok(receive_time as f64)
    } else {
        Err(SignalError::InvalidParameter(format!(
            "receive time must be positive, got {receive_time}"
        )))
    }
}
fn truncated(err: std::io::Error) -> SignalError {
    SignalError::MalformedRecord(err.to_string())
}
