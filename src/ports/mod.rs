mod change_observer;
mod generator;

pub use change_observer::{FileChangeEvent, FileChangeObserver};
pub use generator::{Directive, Generator};
