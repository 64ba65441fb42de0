mod bullet_points;
mod prompt;

pub use bullet_points::{BulletPointPrinter, LineWriter};
pub use prompt::prompt_yes_no;

#[cfg(test)]
pub(crate) use bullet_points::testutils;
