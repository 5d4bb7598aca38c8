#[cfg(test)]
mod sweep;
#[cfg(test)]
mod utils;
