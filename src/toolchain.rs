//! Compiler and linker environment shared by building blocks.

use serde::{Deserialize, Serialize};

/// Describes the build environment a block compiles with.
///
/// Blocks hold it behind an `Arc` and only read it, so several blocks that
/// must agree on compilers can share one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", default)]
pub struct Toolchain {
    pub cc: Option<String>,
    pub cflags: Option<String>,
    pub cppflags: Option<String>,
    pub cxx: Option<String>,
    pub cxxflags: Option<String>,
    pub f77: Option<String>,
    pub f90: Option<String>,
    pub fc: Option<String>,
    pub fcflags: Option<String>,
    pub fflags: Option<String>,
    pub flibs: Option<String>,
    pub ldflags: Option<String>,
    pub libs: Option<String>,
    pub cuda_home: Option<String>,
}

impl Toolchain {
    /// `NAME=value` assignments for every set compiler variable, in a fixed
    /// order. `CUDA_HOME` is not a build variable and is left out.
    pub fn environment(&self) -> Vec<String> {
        let vars = [
            ("CC", &self.cc),
            ("CFLAGS", &self.cflags),
            ("CPPFLAGS", &self.cppflags),
            ("CXX", &self.cxx),
            ("CXXFLAGS", &self.cxxflags),
            ("F77", &self.f77),
            ("F90", &self.f90),
            ("FC", &self.fc),
            ("FCFLAGS", &self.fcflags),
            ("FFLAGS", &self.fflags),
            ("FLIBS", &self.flibs),
            ("LDFLAGS", &self.ldflags),
            ("LIBS", &self.libs),
        ];

        vars.iter()
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{}={}", name, v))
            })
            .collect()
    }
}
