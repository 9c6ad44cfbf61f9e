use std::sync::LazyLock;

use divan::{AllocProfiler, black_box};
use lipochem::{ChainCombination, ChainDescriptor, ChainSymbols, DEFAULT_KDL, Encoding};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const TOKENS: [&str; 6] = [
    "16:0",
    "18:1(n-9)",
    "O-[D9]18:1",
    "d18:1",
    "h24:0;OH",
    "P-20:4(n-6)",
];
const KEYS: [&str; 5] = [
    "18:1_16:0",
    "20:4(n-6)/18:0",
    "22:6_18:1(n-9)_16:0",
    "d18:1_h24:0_-",
    "18:1(n-9)_18:1(n-7)_18:1_16:0",
];

static SYMBOLS: LazyLock<ChainSymbols> = LazyLock::new(ChainSymbols::default);

static CHAINS: LazyLock<Vec<ChainDescriptor>> = LazyLock::new(|| {
    TOKENS
        .into_iter()
        .map(|token| ChainDescriptor::decode(token, &SYMBOLS).unwrap())
        .collect()
});

static COMBINATIONS: LazyLock<Vec<ChainCombination>> = LazyLock::new(|| {
    KEYS.into_iter()
        .map(|key| ChainCombination::decode(key, &SYMBOLS).unwrap())
        .collect()
});

fn main() {
    LazyLock::force(&SYMBOLS);
    LazyLock::force(&CHAINS);
    LazyLock::force(&COMBINATIONS);
    divan::main();
}

mod chains {
    use super::*;

    #[divan::bench]
    fn build_chain_symbols() -> ChainSymbols {
        ChainSymbols::new("chain_symbols.kdl", DEFAULT_KDL).unwrap()
    }

    #[divan::bench]
    fn decode_chains() {
        for token in TOKENS {
            black_box(ChainDescriptor::decode(token, &SYMBOLS).unwrap());
        }
    }

    #[divan::bench]
    fn encode_chains() {
        for chain in CHAINS.iter() {
            black_box(chain.encode(&SYMBOLS, Encoding::FULL).unwrap());
        }
    }
}

mod combinations {
    use lipochem::are_permuted_equivalent;

    use super::*;

    #[divan::bench]
    fn decode_combinations() {
        for key in KEYS {
            black_box(ChainCombination::decode(key, &SYMBOLS).unwrap());
        }
    }

    #[divan::bench]
    fn unresolved_keys() {
        for combination in COMBINATIONS.iter() {
            black_box(combination.unresolved_key(&SYMBOLS).unwrap());
        }
    }

    #[divan::bench]
    fn full_keys() {
        for combination in COMBINATIONS.iter() {
            black_box(combination.key(&SYMBOLS).unwrap());
        }
    }

    #[divan::bench]
    fn permutation_checks() {
        for key in KEYS {
            black_box(are_permuted_equivalent(key, key, &SYMBOLS).unwrap());
        }
    }
}
