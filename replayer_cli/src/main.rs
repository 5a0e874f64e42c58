//! Replays files against a deliberately broken prefix matcher.
//!
//! ```text
//! printf FUZZ > a.bin; printf FUZ > c.bin
//! replayer a.bin missing.bin c.bin
//! replayer -d c.bin
//! replayer -runs=100 -max_len=64 corpus/*
//! ```

use std::ffi::{OsStr, OsString};

/// Returns `true` for inputs starting with `FUZZ`.
///
/// Only checks for three bytes before reading the fourth, so the exact input
/// `FUZ` indexes past the end of the slice.
fn bad_function(data: &[u8]) -> bool {
    if data.len() >= 3 && data[0] == b'F' && data[1] == b'U' && data[2] == b'Z' {
        return data[3] == b'Z';
    }
    false
}

fn fuzz_target(data: &[u8]) -> i32 {
    i32::from(bad_function(data))
}

/// Drops fuzzing-engine options (`-name=value`) so a command line written for
/// the engine can be replayed unchanged.
fn drop_engine_options(args: &mut Vec<OsString>) {
    if args.len() < 2 {
        return;
    }
    let rest = args.split_off(1);
    args.extend(rest.into_iter().filter(|arg| !is_engine_option(arg)));
}

fn is_engine_option(arg: &OsStr) -> bool {
    arg.to_str()
        .and_then(|s| s.strip_prefix('-'))
        .and_then(|s| s.split_once('='))
        .is_some_and(|(name, _)| {
            !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
        })
}

replayer_core::replay_main!(fuzz_target, init = drop_engine_options);
