use chrds::{MessageKind, MessagesView};
use std::{env, time::Instant};

const DEFAULT_MESSAGES: usize = 1_000_000;

const DECODERS: &[(&str, fn(&[u8]) -> Result<u64, String>)] = &[
    ("chrds", decode_chrds),
    ("chrds-owned", decode_chrds_owned),
    ("chrds-parallel", decode_chrds_parallel),
    ("midly-live", decode_midly),
];

/// Sum all note numbers, so that decoding cannot be optimized away.
fn decode_chrds(data: &[u8]) -> Result<u64, String> {
    let messages = MessagesView::new(data).map_err(|err| format!("{}", err))?;
    let mut sum = 0;
    for msg in &messages {
        match msg.kind().map_err(|err| format!("{}", err))? {
            MessageKind::NoteOn | MessageKind::NoteOff => sum += msg.note() as u64,
            _ => {}
        }
    }
    Ok(sum)
}

fn decode_chrds_owned(data: &[u8]) -> Result<u64, String> {
    use chrds::{ChannelMessage, Message};

    let messages = MessagesView::new(data).map_err(|err| format!("{}", err))?;
    let mut sum = 0;
    for msg in messages {
        match msg.to_message().map_err(|err| format!("{}", err))? {
            Message::Channel {
                message: ChannelMessage::NoteOn { key, .. },
                ..
            }
            | Message::Channel {
                message: ChannelMessage::NoteOff { key, .. },
                ..
            } => sum += key.as_int() as u64,
            _ => {}
        }
    }
    Ok(sum)
}

fn decode_chrds_parallel(data: &[u8]) -> Result<u64, String> {
    use rayon::prelude::*;

    let messages = MessagesView::new(data).map_err(|err| format!("{}", err))?;
    messages
        .par_iter()
        .map(|msg| match msg.kind() {
            Ok(MessageKind::NoteOn) | Ok(MessageKind::NoteOff) => Ok(msg.note() as u64),
            Ok(_) => Ok(0),
            Err(err) => Err(format!("{}", err)),
        })
        .sum()
}

fn decode_midly(data: &[u8]) -> Result<u64, String> {
    use midly::{live::LiveEvent, MidiMessage};

    let mut sum = 0;
    for raw in data.chunks(3) {
        let ev = LiveEvent::parse(raw).map_err(|err| format!("{}", err))?;
        match ev {
            LiveEvent::Midi {
                message: MidiMessage::NoteOn { key, .. },
                ..
            }
            | LiveEvent::Midi {
                message: MidiMessage::NoteOff { key, .. },
                ..
            } => sum += key.as_int() as u64,
            _ => {}
        }
    }
    Ok(sum)
}

/// A deterministic stream of note and controller messages.
fn generate(count: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(count * 3);
    for i in 0..count {
        let channel = (i % 16) as u8;
        let key = (i % 128) as u8;
        match i % 4 {
            0 => data.extend_from_slice(&[0x90 | channel, key, 100]),
            1 => data.extend_from_slice(&[0xB0 | channel, 7, key]),
            2 => data.extend_from_slice(&[0xE0 | channel, key, 0x40]),
            _ => data.extend_from_slice(&[0x80 | channel, key, 0]),
        }
    }
    data
}

fn use_decoder(decode: fn(&[u8]) -> Result<u64, String>, data: &[u8]) -> Result<(), String> {
    let round = |num: f64| (num * 100.0).round() / 100.0;

    let runtime = || -> Result<_, String> {
        let start = Instant::now();
        let out = decode(data)?;
        let time = round((start.elapsed().as_micros() as f64) / 1000.0);
        Ok((out, time))
    };

    let (checksum, cold_time) = runtime()?;
    let runtime = || -> Result<_, String> {
        let (out, time) = runtime()?;
        assert_eq!(out, checksum, "decoder is not consistent with itself");
        Ok(time)
    };

    let iters = (2000.0 / cold_time.max(0.01)).floor() as u64 + 1;
    let mut total_time = 0.0;
    let mut max_time = cold_time;
    let mut min_time = cold_time;
    for _ in 0..iters {
        let time = runtime()?;
        total_time += time;
        max_time = max_time.max(time);
        min_time = min_time.min(time);
    }
    let avg_time = round(total_time / (iters as f64));

    eprintln!(
        "checksum {} in {} iters / min {} / avg {} / max {}",
        checksum, iters, min_time, avg_time, max_time
    );

    Ok(())
}

fn main() {
    let decoder_filter = env::args().nth(1).unwrap_or_default().to_lowercase();
    let count = env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_MESSAGES);

    let decoders = DECODERS
        .iter()
        .filter(|(name, _)| name.contains(&decoder_filter))
        .collect::<Vec<_>>();
    if decoders.is_empty() {
        eprintln!("no decoders match the pattern \"{}\"", decoder_filter);
        eprint!("available decoders: ");
        for (i, (name, _)) in DECODERS.iter().enumerate() {
            if i > 0 {
                eprint!(", ");
            }
            eprint!("{}", name);
        }
        eprintln!();
        return;
    }

    let data = generate(count);
    eprintln!("decoding {} messages ({} KB)", count, data.len() / 1024);
    for &(name, decode) in decoders.iter() {
        eprint!("  {}: ", name);
        if let Err(err) = use_decoder(*decode, &data) {
            eprintln!("decode error: {}", err);
        }
    }
}
