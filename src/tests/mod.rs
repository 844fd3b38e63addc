//! Binary-side test suite: end-to-end rendering through the public
//! library API plus config-file handling.
