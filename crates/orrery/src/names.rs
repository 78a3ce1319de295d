//! Display names for spawned bodies.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

const NAMES: &[&str] = &[
    "Aegir", "Albion", "Arrokoth", "Bienor", "Ceto", "Chariklo", "Cyllene", "Daphnis", "Deimos",
    "Eris", "Eurydome", "Ferdinand", "Gonggong", "Haumea", "Hippocamp", "Ixion", "Kalyke",
    "Lysithea", "Makemake", "Mneme", "Naiad", "Orcus", "Pallene", "Quaoar", "Rhea", "Salacia",
    "Sedna", "Thalassa", "Varda", "Ymir",
];

/// Shuffled cycle over a fixed name list.
///
/// Names repeat once the deck is exhausted (after a reshuffle); they are
/// diagnostic labels, not identifiers.
#[derive(Debug)]
pub struct NameDeck {
    deck: Vec<&'static str>,
    cursor: usize,
    rng: ChaChaRng,
}

impl NameDeck {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let mut deck = NAMES.to_vec();
        deck.shuffle(&mut rng);
        Self {
            deck,
            cursor: 0,
            rng,
        }
    }

    pub fn next_name(&mut self) -> String {
        if self.cursor >= self.deck.len() {
            self.deck.shuffle(&mut self.rng);
            self.cursor = 0;
        }
        let name = self.deck[self.cursor];
        self.cursor += 1;
        name.to_string()
    }
}
