//! OpenMPI building block tests
//!
//! Full renders of the block in both formats, plus the option switches that
//! change individual lines of the output.

use recipebox::blocks::{OpenMpi, OpenMpiConfig};
use recipebox::{BlockError, ContainerFormat, InstructionList, Renderable, Toolchain};
use std::sync::Arc;
use yare::parameterized;

const DEFAULT_DOCKER: &str = r#"# OpenMPI version 3.0.0

RUN apt-get update -y && \
    apt-get install -y --no-install-recommends \
        file \
        hwloc \
        openssh-client \
        wget && \
    rm -rf /var/lib/apt/lists/*

RUN mkdir -p /tmp && wget -q -nc --no-check-certificate -P /tmp https://www.open-mpi.org/software/ompi/v3.0/downloads/openmpi-3.0.0.tar.bz2 && \
    mkdir -p /tmp && tar -x -f /tmp/openmpi-3.0.0.tar.bz2 -C /tmp -j && \
    cd /tmp/openmpi-3.0.0 && ./configure --prefix=/usr/local/openmpi --disable-getpwuid --enable-orterun-prefix-by-default --with-cuda --with-verbs && \
    make -j4 && \
    make -j4 install && \
    rm -rf /tmp/openmpi-3.0.0.tar.bz2 /tmp/openmpi-3.0.0

ENV LD_LIBRARY_PATH=/usr/local/openmpi/lib:$LD_LIBRARY_PATH \
    PATH=/usr/local/openmpi/bin:$PATH"#;

const DEFAULT_SINGULARITY: &str = r#"# OpenMPI version 3.0.0

%post
    apt-get update -y && \
    apt-get install -y --no-install-recommends \
        file \
        hwloc \
        openssh-client \
        wget && \
    rm -rf /var/lib/apt/lists/*

%post
    mkdir -p /tmp && wget -q -nc --no-check-certificate -P /tmp https://www.open-mpi.org/software/ompi/v3.0/downloads/openmpi-3.0.0.tar.bz2 && \
    mkdir -p /tmp && tar -x -f /tmp/openmpi-3.0.0.tar.bz2 -C /tmp -j && \
    cd /tmp/openmpi-3.0.0 && ./configure --prefix=/usr/local/openmpi --disable-getpwuid --enable-orterun-prefix-by-default --with-cuda --with-verbs && \
    make -j4 && \
    make -j4 install && \
    rm -rf /tmp/openmpi-3.0.0.tar.bz2 /tmp/openmpi-3.0.0

%environment
    export LD_LIBRARY_PATH=/usr/local/openmpi/lib:$LD_LIBRARY_PATH
    export PATH=/usr/local/openmpi/bin:$PATH"#;

fn render_docker(config: OpenMpiConfig) -> String {
    OpenMpi::new(config)
        .render(&ContainerFormat::Docker)
        .expect("render failed")
}

#[test]
fn test_default_docker() {
    assert_eq!(render_docker(OpenMpiConfig::default()), DEFAULT_DOCKER);
}

#[test]
fn test_default_singularity() {
    let rendered = OpenMpi::default()
        .render(&ContainerFormat::Singularity)
        .unwrap();
    assert_eq!(rendered, DEFAULT_SINGULARITY);
}

#[test]
fn test_render_is_deterministic() {
    let first = render_docker(OpenMpiConfig::default());
    let second = render_docker(OpenMpiConfig::default());
    assert_eq!(first, second);
}

#[test]
fn test_repeated_render_does_not_duplicate_commands() {
    let block = OpenMpi::default();
    let first = block.render(&ContainerFormat::Docker).unwrap();
    let second = block.render(&ContainerFormat::Docker).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.matches("make -j4 install").count(), 1);
}

#[test]
fn test_one_block_renders_both_formats() {
    let block = OpenMpi::default();
    assert_eq!(block.render(&ContainerFormat::Docker).unwrap(), DEFAULT_DOCKER);
    assert_eq!(
        block.render(&ContainerFormat::Singularity).unwrap(),
        DEFAULT_SINGULARITY
    );
}

#[test]
fn test_unsupported_format_renders_nothing() {
    let rendered = OpenMpi::default()
        .render(&ContainerFormat::Custom("charliecloud".to_string()))
        .unwrap();
    assert_eq!(rendered, "");
}

#[test]
fn test_check_enabled() {
    let rendered = render_docker(OpenMpiConfig {
        check: true,
        ..Default::default()
    });
    assert!(rendered.contains("    make -j4 && \\\n    make -j4 check && \\\n    make -j4 install"));
}

#[test]
fn test_version_and_parallelism() {
    let rendered = render_docker(OpenMpiConfig {
        version: "4.0.5".to_string(),
        parallel: 16,
        ..Default::default()
    });
    assert!(rendered.starts_with("# OpenMPI version 4.0.5\n\n"));
    assert!(rendered.contains("/v4.0/downloads/openmpi-4.0.5.tar.bz2"));
    assert!(rendered.contains("cd /tmp/openmpi-4.0.5 && ./configure"));
    assert!(rendered.contains("make -j16 install"));
}

#[test]
fn test_two_part_version() {
    let rendered = render_docker(OpenMpiConfig {
        version: "4.1".to_string(),
        ..Default::default()
    });
    assert!(rendered.contains(
        "https://www.open-mpi.org/software/ompi/v4.1/downloads/openmpi-4.1.tar.bz2"
    ));
}

#[parameterized(
    both_enabled = { true, true, "--with-cuda --with-verbs" },
    no_cuda = { false, true, "--without-cuda --with-verbs" },
    no_infiniband = { true, false, "--with-cuda --without-verbs" },
    neither = { false, false, "--without-cuda --without-verbs" },
)]
fn test_feature_flags(cuda: bool, infiniband: bool, expected: &str) {
    let rendered = render_docker(OpenMpiConfig {
        cuda,
        infiniband,
        ..Default::default()
    });
    let configure_tail = format!("--enable-orterun-prefix-by-default {} && \\", expected);
    assert!(
        rendered.contains(&configure_tail),
        "missing `{}` in:\n{}",
        configure_tail,
        rendered
    );
}

#[test]
fn test_user_supplied_cuda_flag_is_replaced() {
    let rendered = render_docker(OpenMpiConfig {
        configure_opts: vec![
            "--with-cuda=/opt/old-cuda".to_string(),
            "--enable-mpi-cxx".to_string(),
        ],
        cuda: false,
        ..Default::default()
    });
    assert!(rendered.contains("--enable-mpi-cxx --without-cuda --with-verbs"));
    assert!(!rendered.contains("/opt/old-cuda"));
}

#[test]
fn test_toolchain_environment_and_cuda_home() {
    let toolchain = Toolchain {
        cc: Some("gcc".to_string()),
        cxx: Some("g++".to_string()),
        cuda_home: Some("/usr/local/cuda".to_string()),
        ..Default::default()
    };
    let rendered = render_docker(OpenMpiConfig {
        toolchain: Arc::new(toolchain),
        ..Default::default()
    });
    assert!(rendered.contains(
        "cd /tmp/openmpi-3.0.0 && CC=gcc CXX=g++ ./configure --prefix=/usr/local/openmpi"
    ));
    assert!(rendered.contains("--with-cuda=/usr/local/cuda --with-verbs"));
    assert!(!rendered.contains("CUDA_HOME="));
}

#[test]
fn test_custom_prefix() {
    let rendered = render_docker(OpenMpiConfig {
        prefix: "/opt/mpi".to_string(),
        ..Default::default()
    });
    assert!(rendered.contains("./configure --prefix=/opt/mpi "));
    assert!(rendered.ends_with(
        "ENV LD_LIBRARY_PATH=/opt/mpi/lib:$LD_LIBRARY_PATH \\\n    PATH=/opt/mpi/bin:$PATH"
    ));
}

#[test]
fn test_local_directory_source() {
    let rendered = render_docker(OpenMpiConfig {
        directory: "openmpi-4.0.0".to_string(),
        ..Default::default()
    });

    assert!(rendered.starts_with("# OpenMPI\n\n"));
    assert!(rendered.contains("\n\nCOPY openmpi-4.0.0 /tmp/openmpi-4.0.0\n\n"));
    assert!(!rendered.contains("wget -q"));
    assert!(rendered.contains(
        "RUN cd /tmp/openmpi-4.0.0 && ./configure --prefix=/usr/local/openmpi"
    ));
    assert!(rendered.contains("rm -rf /tmp/openmpi-4.0.0\n\nENV "));

    let copy = rendered.find("COPY ").unwrap();
    let configure = rendered.find("./configure").unwrap();
    assert!(copy < configure);
}

#[test]
fn test_local_directory_wins_over_repository() {
    let rendered = render_docker(OpenMpiConfig {
        directory: "ompi-src".to_string(),
        repository: "https://github.com/open-mpi/ompi.git".to_string(),
        ..Default::default()
    });
    assert!(rendered.contains("COPY ompi-src /tmp/ompi-src"));
    assert!(!rendered.contains("git clone"));
}

#[test]
fn test_git_source() {
    let rendered = render_docker(OpenMpiConfig {
        repository: "https://github.com/open-mpi/ompi.git".to_string(),
        branch: Some("v4.0.x".to_string()),
        ..Default::default()
    });

    assert!(rendered.starts_with("# OpenMPI\n\n"));
    assert!(rendered.contains("        autoconf \\\n"));
    assert!(rendered.contains(
        "RUN mkdir -p /tmp && cd /tmp && git clone --depth=1 --branch v4.0.x https://github.com/open-mpi/ompi.git ompi && cd - && \\\n    cd /tmp/ompi && ./autogen.pl && \\\n    cd /tmp/ompi && ./configure"
    ));
    assert!(rendered.contains("rm -rf /tmp/ompi\n\n"));
    assert!(!rendered.contains("tar.bz2"));
}

#[test]
fn test_git_recursive_clone() {
    let rendered = render_docker(OpenMpiConfig {
        repository: "git@github.com:open-mpi/ompi.git".to_string(),
        recursive: true,
        ..Default::default()
    });
    assert!(rendered.contains("git clone --depth=1 --recursive git@github.com:open-mpi/ompi.git ompi"));
}

#[test]
fn test_version_text_is_used_as_written() {
    let rendered = render_docker(OpenMpiConfig {
        version: "3.01.0".to_string(),
        ..Default::default()
    });
    assert!(rendered.starts_with("# OpenMPI version 3.01.0\n\n"));
    assert!(rendered.contains(
        "https://www.open-mpi.org/software/ompi/v3.01/downloads/openmpi-3.01.0.tar.bz2"
    ));
    assert!(rendered.contains("cd /tmp/openmpi-3.01.0 && ./configure"));
}

#[parameterized(
    leading_space = { " 3.0.0" },
    trailing_space = { "3.0.0 " },
    trailing_newline = { "3.0.0\n" },
)]
fn test_padded_version_is_rejected(version: &str) {
    let block = OpenMpi::new(OpenMpiConfig {
        version: version.to_string(),
        ..Default::default()
    });
    assert_eq!(
        block.render(&ContainerFormat::Docker),
        Err(BlockError::InvalidVersion {
            version: version.to_string()
        })
    );
}

#[test]
fn test_invalid_version_is_reported() {
    let block = OpenMpi::new(OpenMpiConfig {
        version: "three".to_string(),
        ..Default::default()
    });
    assert_eq!(
        block.render(&ContainerFormat::Docker),
        Err(BlockError::InvalidVersion {
            version: "three".to_string()
        })
    );
}

#[test]
fn test_invalid_version_inside_list_reports_position() {
    let list = InstructionList::new()
        .with(OpenMpi::default())
        .with(OpenMpi::new(OpenMpiConfig {
            version: "3".to_string(),
            ..Default::default()
        }));

    let err = list.render(&ContainerFormat::Docker).unwrap_err();
    assert!(matches!(err, BlockError::Element { index: 1, .. }));
    assert!(matches!(err.root_cause(), BlockError::InvalidVersion { .. }));
    assert_eq!(list.render_lenient(&ContainerFormat::Docker), DEFAULT_DOCKER);
}

#[test]
fn test_invalid_version_is_ignored_by_local_source() {
    let rendered = render_docker(OpenMpiConfig {
        version: "not-used".to_string(),
        directory: "ompi".to_string(),
        ..Default::default()
    });
    assert!(rendered.contains("COPY ompi /tmp/ompi"));
}

#[test]
fn test_runtime_docker() {
    let runtime = OpenMpi::default().runtime("0");
    let rendered = runtime.render(&ContainerFormat::Docker).unwrap();
    assert_eq!(
        rendered,
        r#"# OpenMPI

RUN apt-get update -y && \
    apt-get install -y --no-install-recommends \
        hwloc \
        openssh-client && \
    rm -rf /var/lib/apt/lists/*

COPY --from=0 /usr/local/openmpi /usr/local/openmpi

ENV LD_LIBRARY_PATH=/usr/local/openmpi/lib:$LD_LIBRARY_PATH \
    PATH=/usr/local/openmpi/bin:$PATH"#
    );
}

#[test]
fn test_runtime_singularity_copies_from_stage() {
    let runtime = OpenMpi::default().runtime("devel");
    let rendered = runtime.render(&ContainerFormat::Singularity).unwrap();
    assert!(rendered.contains("%files from devel\n    /usr/local/openmpi /usr/local/openmpi"));
    assert!(rendered.ends_with("export PATH=/usr/local/openmpi/bin:$PATH"));
}

#[test]
fn test_apk_package_manager() {
    let yaml = "package_manager: apk\nruntime_ospackages: [openssh]\n";
    let config: OpenMpiConfig = serde_yaml::from_str(yaml).unwrap();
    let block = OpenMpi::new(config);

    let build = block.render(&ContainerFormat::Docker).unwrap();
    assert!(build.contains("RUN apk update && \\\n    apk add --no-cache \\\n        file \\\n"));
    assert!(build.contains("rm -rf /var/cache/apk/*"));

    let runtime = block.runtime("0").render(&ContainerFormat::Docker).unwrap();
    assert!(runtime.contains("apk add --no-cache \\\n        openssh && \\\n"));
}
