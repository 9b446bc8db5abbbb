#![no_main]

use libfuzzer_sys::fuzz_target;
use sim_core::{decode, disassemble, Cpu, MEMORY_WORDS, WORD_MASK};

fuzz_target!(|data: &[u8]| {
    let image: Vec<u16> = data
        .chunks_exact(2)
        .take(MEMORY_WORDS)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]) & WORD_MASK)
        .collect();

    for word in &image {
        assert!(decode(*word).is_some());
        assert!(!disassemble(*word).is_empty());
    }

    let Ok(mut cpu) = Cpu::new(&image) else {
        return;
    };
    let _ = cpu.run().expect("masked words always decode");

    for word in cpu.memory() {
        assert!(*word <= WORD_MASK);
    }
    for index in 0..16 {
        assert!(cpu.registers().read(index) <= WORD_MASK);
    }
});
