pub use library::LibraryConfig;

mod library;
