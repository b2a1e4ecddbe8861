pub mod game;
pub mod official;

pub use game::{Game, Primacy};
pub use official::{Official, RoleScores};
