use crate::choice::{Choice, Player};

/// Fixed bindings: player one on the home row, player two on the numpad.
pub const BINDINGS: [(char, Player, Choice); 6] = [
    ('a', Player::P1, Choice::Rock),
    ('s', Player::P1, Choice::Paper),
    ('d', Player::P1, Choice::Scissors),
    ('4', Player::P2, Choice::Rock),
    ('5', Player::P2, Choice::Paper),
    ('6', Player::P2, Choice::Scissors),
];

/// Map a pressed key to the player that owns it and the hand it throws.
/// Keys are matched case-insensitively; anything else is `None`.
pub fn lookup(key: char) -> Option<(Player, Choice)> {
    let key = key.to_ascii_lowercase();
    BINDINGS
        .iter()
        .find(|(bound, _, _)| *bound == key)
        .map(|&(_, player, choice)| (player, choice))
}

/// The key a player presses for a given hand
pub fn key_for(player: Player, choice: Choice) -> char {
    BINDINGS
        .iter()
        .find(|(_, p, c)| *p == player && *c == choice)
        .map(|&(key, _, _)| key)
        .unwrap_or('?')
}
