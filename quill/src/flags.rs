use std::path::PathBuf;

xflags::xflags! {
    /// Builds the blog of the static site at ROOT.
    cmd quill {
        /// Project root. Defaults to the current directory.
        optional root: PathBuf
        /// Output directory, instead of the configured one.
        optional -o, --output output: PathBuf
        /// Settings file, instead of `quill.toml` in the project root.
        optional -c, --config config: PathBuf
        /// Only log errors.
        optional -q, --quiet
    }
}
