/// A hand a player can throw. The discriminants are the values used on the wire
/// and in logs (1: rock, 2: paper, 3: scissors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Choice {
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Choice::Rock),
            2 => Some(Choice::Paper),
            3 => Some(Choice::Scissors),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Choice {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Choice::from_value(value).ok_or(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Player {
    P1,
    P2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    P1Wins,
    P2Wins,
    Draw,
    Undecided,
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::P1Wins => Some(Player::P1),
            Outcome::P2Wins => Some(Player::P2),
            Outcome::Draw | Outcome::Undecided => None,
        }
    }
}

/// Every (winner, loser) pairing. Anything not listed here, and not a draw,
/// is a loss for the first hand.
const BEATS: [(Choice, Choice); 3] = [
    (Choice::Rock, Choice::Scissors),
    (Choice::Paper, Choice::Rock),
    (Choice::Scissors, Choice::Paper),
];

pub fn resolve(p1: Choice, p2: Choice) -> Outcome {
    if p1 == p2 {
        return Outcome::Draw;
    }

    if BEATS.contains(&(p1, p2)) {
        Outcome::P1Wins
    } else {
        Outcome::P2Wins
    }
}
