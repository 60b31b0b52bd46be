pub mod dextools;
