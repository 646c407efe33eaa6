/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}

pub mod timing {

    use super::group_digits;
    use std::time::Instant;
    use std::io::Write;

    /// Wall-clock timer for the steps of a command-line run
    pub struct Progress {
        previous: Instant,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now() } }

        /// Print message, append ellipsis, flush stdout, stay on same line, start timer.
        pub fn start(&mut self, message: &str) {
            print!("{message} ... ");
            // A failed flush only delays the message
            std::io::stdout().flush().ok();
            self.start_timer();
        }

        /// Print time elapsed since last start or done
        pub fn done(&mut self) {
            println!("{} ms", group_digits(self.elapsed_ms()));
            self.start_timer();
        }

        fn elapsed_ms(&self) -> u128 { self.previous.elapsed().as_millis() }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(7, "7")]
    #[case(1234, "1,234")]
    #[case(1234567, "1,234,567")]
    fn digits_are_grouped(#[case] n: u128, #[case] expected: &str) {
        assert_eq!(group_digits(n), expected);
    }
}
