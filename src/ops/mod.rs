pub mod commit;
pub mod cursor;
pub mod locate;
pub mod rank;

pub use commit::{commit, mention_text};
pub use cursor::{Direction, advance};
pub use locate::{clamp_caret, locate};
pub use rank::{Ranker, rank, similarity};
