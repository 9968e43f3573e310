use alloc::vec::Vec;

use rfblinds_api::models::{PulsePair, PulseProfile};

use super::Pulse;

/// Natural binary width of `code`. Zero still occupies one digit.
pub fn bit_length(code: u64) -> u32 {
    (u64::BITS - code.leading_zeros()).max(1)
}

/// Binary digits of `code`, most significant first, without padding.
pub fn bits(code: u64) -> impl Iterator<Item = bool> {
    (0..bit_length(code)).rev().map(move |shift| (code >> shift) & 1 == 1)
}

/// Renders `code` into the full pulse train for `profile`, all repetitions included.
pub fn encode(code: u64, profile: &PulseProfile) -> Vec<Pulse> {
    let width = bit_length(code) as usize;
    let mut pulses = Vec::with_capacity(profile.repeat_count as usize * (2 + 2 * width));

    for _ in 0..profile.repeat_count {
        push_pair(&mut pulses, &profile.sync);
        for bit in bits(code) {
            push_pair(&mut pulses, profile.bit(bit));
        }
    }

    pulses
}

fn push_pair(pulses: &mut Vec<Pulse>, pair: &PulsePair) {
    pulses.push(Pulse::high(pair.high_us));
    pulses.push(Pulse::low(pair.low_us));
}
