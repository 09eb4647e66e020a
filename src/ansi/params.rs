//! Small helper for pulling defaulted numeric parameters out of `vte::Params`.
//!
//! Grounded in the `ParamsExt`/`extract_nth_opt` helper used throughout
//! `core/pty_mux/vt_100_ansi_parser/operations/*.rs`.

pub trait ParamsExt {
    /// The `n`th parameter group's first value, or `None` if there are fewer than `n + 1` groups.
    fn nth_opt(&self, n: usize) -> Option<u16>;

    /// The `n`th parameter, defaulting to `default` when absent or explicitly `0` — CSI finals
    /// treat an omitted or zero parameter as "use the default" per §4.E.
    fn nth_or(&self, n: usize, default: u16) -> u16 {
        match self.nth_opt(n) {
            Some(0) | None => default,
            Some(v) => v,
        }
    }

    fn nth_or_1(&self, n: usize) -> u16 {
        self.nth_or(n, 1)
    }
}

impl ParamsExt for vte::Params {
    fn nth_opt(&self, n: usize) -> Option<u16> {
        self.iter().nth(n).and_then(|group| group.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one() {
        let params = vte::Params::default();
        assert_eq!(params.nth_or_1(0), 1);
    }
}
