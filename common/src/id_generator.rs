use crate::games::SessionRng;
use crate::identifiers::RoomId;

const ADJECTIVES: &[&str] = &[
    "Patient", "Sharp", "Quiet", "Steady", "Crafty", "Stubborn", "Calm", "Restless",
    "Careful", "Daring", "Lucky", "Sleepy",
];

const NOUNS: &[&str] = &[
    "Crane", "Tortoise", "Heron", "Carp", "Monk", "Scholar", "Lantern", "Bamboo",
    "Pebble", "Willow", "Sparrow", "Ferry",
];

/// Display name for an offline opponent, stable for a given session seed.
pub fn generate_bot_name(rng: &mut SessionRng) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{} {}", adjective, noun)
}

pub fn generate_room_id(rng: &mut SessionRng) -> RoomId {
    RoomId::new(format!("room-{:08x}", rng.random::<u32>()))
}
