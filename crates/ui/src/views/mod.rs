mod memo;
mod question;
mod top;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use memo::MemoView;
pub use question::QuestionView;
pub use top::TopView;
