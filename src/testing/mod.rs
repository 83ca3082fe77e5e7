mod fake_generator;

pub use fake_generator::FakeGenerator;
