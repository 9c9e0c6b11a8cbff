//! Benchmark request construction.

use std::collections::BTreeMap;

use crate::error::BenchError;

/// A named benchmark action plus its string parameters.
///
/// The name is not validated locally; the orchestrator rejects actions
/// the charm does not expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRequest {
    /// Action name (`fio`, `rbd-bench`, ...).
    pub name: String,
    /// Action parameters, keys unique.
    pub params: BTreeMap<String, String>,
}

impl BenchmarkRequest {
    /// Request with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Build a request from the CLI's alternating KEY VALUE argument
    /// list. A key without a value is rejected; a repeated key keeps the
    /// last value.
    pub fn from_pairs(name: impl Into<String>, args: &[String]) -> Result<Self, BenchError> {
        if args.len() % 2 != 0 {
            return Err(BenchError::DanglingKey(args[args.len() - 1].clone()));
        }
        let params = args
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();
        Ok(Self {
            name: name.into(),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_become_params() {
        let request = BenchmarkRequest::from_pairs(
            "fio",
            &strings(&["image-size", "1024", "operation", "write"]),
        )
        .unwrap();
        assert_eq!(request.name, "fio");
        assert_eq!(request.params["image-size"], "1024");
        assert_eq!(request.params["operation"], "write");
    }

    #[test]
    fn no_pairs_is_fine() {
        let request = BenchmarkRequest::from_pairs("rbd-bench", &[]).unwrap();
        assert!(request.params.is_empty());
    }

    #[test]
    fn dangling_key_is_rejected() {
        let err = BenchmarkRequest::from_pairs("fio", &strings(&["image-size"])).unwrap_err();
        match err {
            BenchError::DanglingKey(key) => assert_eq!(key, "image-size"),
            other => panic!("expected dangling key, got {other}"),
        }
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let request = BenchmarkRequest::from_pairs(
            "fio",
            &strings(&["runtime", "30", "runtime", "60"]),
        )
        .unwrap();
        assert_eq!(request.params["runtime"], "60");
        assert_eq!(request.params.len(), 1);
    }
}
