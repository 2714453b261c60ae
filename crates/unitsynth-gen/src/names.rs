//! Identifier generation for synthesized variables and types.
//!
//! Generates names like "SwiftPenguin1", "CosmicBadger2". The numeric suffix
//! increases on every call, so names never collide within one generator.

use rand::Rng;
use rand::rngs::StdRng;

/// Supplies fresh identifier text.
pub trait IdentGenerator {
    /// A new identifier, unique for the lifetime of the generator.
    fn generate(&mut self) -> String;
}

/// Adjectives for name generation.
const ADJECTIVES: &[&str] = &[
    "Swift", "Cosmic", "Bright", "Silent", "Nimble", "Golden", "Silver", "Clever", "Noble",
    "Brave", "Gentle", "Fierce", "Steady", "Quiet", "Bold", "Calm", "Quick", "Sharp", "Wild",
    "Wise", "Agile", "Amber", "Arctic", "Azure", "Bronze", "Coral", "Crystal", "Dusty", "Ember",
    "Frosty", "Hidden", "Ivory", "Jade", "Keen", "Lunar", "Misty", "Neon", "Primal", "Radiant",
    "Scarlet", "Tawny", "Velvet", "Zephyr",
];

/// Animals for name generation.
const ANIMALS: &[&str] = &[
    "Penguin", "Badger", "Falcon", "Otter", "Raven", "Tiger", "Wolf", "Bear", "Eagle", "Hawk",
    "Fox", "Lynx", "Owl", "Puma", "Stag", "Crane", "Finch", "Heron", "Cobra", "Viper", "Bison",
    "Condor", "Coyote", "Dolphin", "Gecko", "Jaguar", "Lemur", "Mantis", "Moose", "Osprey",
    "Panther", "Python", "Rabbit", "Salmon", "Shark", "Sparrow", "Turtle", "Walrus", "Wombat",
    "Zebra",
];

/// Adjective-animal identifiers with a monotonically increasing suffix.
pub struct WordNames {
    rng: StdRng,
    counter: u64,
}

impl WordNames {
    pub fn new(rng: StdRng) -> Self {
        Self { rng, counter: 0 }
    }
}

impl IdentGenerator for WordNames {
    fn generate(&mut self) -> String {
        self.counter += 1;
        let adj = ADJECTIVES[self.rng.gen_range(0..ADJECTIVES.len())];
        let animal = ANIMALS[self.rng.gen_range(0..ANIMALS.len())];
        format!("{adj}{animal}{}", self.counter)
    }
}

/// `Name` -> `name`
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `name` -> `Name`
pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `name` is visible outside its package.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
