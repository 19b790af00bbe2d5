/// Unpacks tarballs with `tar`, picking the decompression flag from the
/// file extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tar;

const COMPRESSIONS: &[(&str, &str)] = &[
    (".tar.bz2", "-j"),
    (".tbz", "-j"),
    (".tar.gz", "-z"),
    (".tgz", "-z"),
    (".tar.xz", "-J"),
    (".txz", "-J"),
];

impl Tar {
    pub fn untar_step(&self, tarball: &str, directory: &str) -> String {
        let mut opts = vec!["-x".to_string(), format!("-f {}", tarball)];
        if !directory.is_empty() {
            opts.push(format!("-C {}", directory));
        }
        if let Some(flag) = compression_flag(tarball) {
            opts.push(flag.to_string());
        }

        let untar = format!("tar {}", opts.join(" "));
        if directory.is_empty() {
            untar
        } else {
            format!("mkdir -p {} && {}", directory, untar)
        }
    }
}

fn compression_flag(tarball: &str) -> Option<&'static str> {
    COMPRESSIONS
        .iter()
        .find(|(ext, _)| tarball.ends_with(ext))
        .map(|(_, flag)| *flag)
}

/// Name of the directory a tarball conventionally unpacks into: the file
/// name without its archive extension.
pub fn tarball_stem(tarball: &str) -> &str {
    let name = tarball.rsplit('/').next().unwrap_or(tarball);
    COMPRESSIONS
        .iter()
        .map(|(ext, _)| *ext)
        .chain(std::iter::once(".tar"))
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}
