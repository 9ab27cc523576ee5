//! Combat - formulas, instant resolution and interactive sessions
//!
//! Everything here is computation over snapshots. Persistence happens
//! afterwards, when the caller hands the `BattleResult` to the
//! progression resolver.

pub mod autoresolve;
pub mod constants;
pub mod formula;
pub mod result;
pub mod session;

pub use autoresolve::{resolve_arena, resolve_hunt, resolve_rounds, AutoresolveOutcome};
pub use constants::*;
pub use formula::{damage, win_chance, AttackProfile, DefenseProfile};
pub use result::{BattleResult, Drop};
pub use session::{
    BattleSession, PlayerAction, SessionEvent, SessionEventKind, SessionPhase,
};
