pub mod logging;
#[cfg(test)]
pub mod rand;
