use std::{
    fs::File,
    io::BufReader,
    path::Path,
    sync::{Arc, Mutex},
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample};
use rodio::{source::UniformSourceIterator, Decoder, Source};
use tracing::{debug, error};

use super::{AudioError, Sound};

/// Overlapping pops beyond this drop the oldest one.
const MAX_VOICES: usize = 8;

/// Playback cursor into the decoded clip.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Voice {
    cursor: usize,
}

type Voices = Arc<Mutex<Vec<Voice>>>;

/// A decoded clip played through its own output stream.
pub struct StreamSound {
    _stream: cpal::Stream,
    voices: Voices,
}

impl StreamSound {
    pub fn open(path: &Path) -> Result<Self, AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let host = cpal::default_host();

        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();

        // Decoded straight to the device's layout so the callback only copies.
        let clip = decode(file, path, config.channels, config.sample_rate.0)?;

        let voices = Voices::default();

        let stream = match sample_format {
            SampleFormat::F32 => build::<f32>(&device, &config, clip, voices.clone()),
            SampleFormat::I16 => build::<i16>(&device, &config, clip, voices.clone()),
            SampleFormat::U16 => build::<u16>(&device, &config, clip, voices.clone()),
            other => return Err(AudioError::UnsupportedFormat(other)),
        }?;

        stream.play()?;

        debug!(
            "Output stream: {} channel(s) at {}hz, {:?}.",
            config.channels, config.sample_rate.0, sample_format
        );

        Ok(Self {
            _stream: stream,
            voices,
        })
    }
}

impl Sound for StreamSound {
    fn is_loaded(&self) -> bool {
        true
    }

    fn play(&self) {
        let Ok(mut voices) = self.voices.try_lock() else {
            debug!("Audio callback busy, pop skipped.");
            return;
        };

        if voices.len() >= MAX_VOICES {
            voices.remove(0);
        }

        voices.push(Voice { cursor: 0 });
    }
}

fn decode(file: File, path: &Path, channels: u16, rate: u32) -> Result<Arc<[f32]>, AudioError> {
    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "{}: {} channel(s) at {}hz.",
        path.display(),
        decoder.channels(),
        decoder.sample_rate()
    );

    let clip: Arc<[f32]> = UniformSourceIterator::<_, f32>::new(decoder, channels, rate).collect();

    if clip.is_empty() {
        return Err(AudioError::Empty(path.to_path_buf()));
    }

    Ok(clip)
}

fn build<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    clip: Arc<[f32]>,
    voices: Voices,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let err_fn = |err: cpal::StreamError| error!("an error occurred on the output audio stream: {err}");

    let mut mix = Vec::<f32>::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            mix.clear();
            mix.resize(data.len(), 0.0);

            if let Ok(mut voices) = voices.lock() {
                mix_voices(&clip, &mut voices, &mut mix);
            }

            for (out, &smp) in data.iter_mut().zip(mix.iter()) {
                *out = T::from_sample(smp);
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

/// Sums every voice into `out`, advancing cursors and dropping
/// voices that reached the end of the clip.
fn mix_voices(clip: &[f32], voices: &mut Vec<Voice>, out: &mut [f32]) {
    for voice in voices.iter_mut() {
        let rest = clip.get(voice.cursor..).unwrap_or_default();

        for (o, &s) in out.iter_mut().zip(rest) {
            *o += s;
        }

        voice.cursor += out.len().min(rest.len());
    }

    voices.retain(|v| v.cursor < clip.len());

    for o in out.iter_mut() {
        *o = o.clamp(-1.0, 1.0);
    }
}
