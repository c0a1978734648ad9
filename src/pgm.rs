//! Binary PGM (`P5`) images with one byte per cell.
//!
//! Header layout is `P5\n<width> <height>\n255\n` followed by `width * height`
//! bytes in row-major order.

use crate::{
    error::{GolError, Result},
    grid::{Dimensions, Grid},
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

const MAGIC: &str = "P5";
const MAX_VALUE: usize = 255;

/// `<dir>/<W>x<H>.pgm`
pub fn input_path(dir: &Path, dims: Dimensions) -> PathBuf {
    dir.join(format!("{}.pgm", dims))
}

/// `<dir>/<W>x<H>x<turns>.pgm`
pub fn output_path(dir: &Path, dims: Dimensions, turns: usize) -> PathBuf {
    dir.join(format!("{}x{}.pgm", dims, turns))
}

/// Reads the image for `expected` from `dir`, following the `<W>x<H>.pgm` convention.
pub fn load_grid(dir: &Path, expected: Dimensions) -> Result<Grid> {
    read_pgm(&input_path(dir, expected), expected)
}

/// Reads and validates a pgm file whose declared size must equal `expected`.
pub fn read_pgm(path: &Path, expected: Dimensions) -> Result<Grid> {
    let data = fs::read(path).map_err(|e| GolError::io(path, e))?;
    let grid = parse_pgm(path, &data, expected)?;
    debug!(path = %path.display(), dims = %expected, "loaded pgm");
    Ok(grid)
}

/// Whitespace-separated header tokens followed by raw pixel bytes.
struct Header<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Header<'a> {
    fn token(&mut self) -> Option<&'a [u8]> {
        let data = self.data;
        while self.pos < data.len() && data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        while self.pos < data.len() && !data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        (start < self.pos).then(|| &data[start..self.pos])
    }

    fn number(&mut self, path: &Path, what: &str) -> Result<usize> {
        let malformed = |reason: String| GolError::MalformedHeader {
            path: path.to_path_buf(),
            reason,
        };
        let token = self
            .token()
            .ok_or_else(|| malformed(format!("missing {}", what)))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed(format!("bad {}", what)))
    }

    /// Pixels start after exactly one whitespace byte following the last header token.
    fn pixels(&self) -> &'a [u8] {
        self.data.get(self.pos + 1..).unwrap_or(&[])
    }
}

fn parse_pgm(path: &Path, data: &[u8], expected: Dimensions) -> Result<Grid> {
    let mut header = Header { data, pos: 0 };
    if header.token() != Some(MAGIC.as_bytes()) {
        return Err(GolError::NotPgm {
            path: path.to_path_buf(),
        });
    }

    let width = header.number(path, "width")?;
    let height = header.number(path, "height")?;
    let found = Dimensions::new(width, height);
    if found != expected {
        return Err(GolError::DimensionMismatch {
            path: path.to_path_buf(),
            expected,
            found,
        });
    }
    let max_value = header.number(path, "maxval")?;
    if max_value != MAX_VALUE {
        return Err(GolError::BitDepth {
            path: path.to_path_buf(),
            found: max_value,
        });
    }

    let pixels = header.pixels();
    if pixels.len() < expected.cells() {
        return Err(GolError::TruncatedPixels {
            path: path.to_path_buf(),
            expected: expected.cells(),
            found: pixels.len(),
        });
    }
    Ok(Grid::from_bytes(expected, &pixels[..expected.cells()]))
}

/// Writes `grid` to `path`, creating the parent directory if needed.
pub fn write_pgm(grid: &Grid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GolError::io(parent, e))?;
    }
    let mut buf = Vec::with_capacity(grid.as_bytes().len() + 32);
    write!(
        buf,
        "{}\n{} {}\n{}\n",
        MAGIC,
        grid.width(),
        grid.height(),
        MAX_VALUE
    )
    .map_err(|e| GolError::io(path, e))?;
    buf.extend_from_slice(grid.as_bytes());

    let mut file = fs::File::create(path).map_err(|e| GolError::io(path, e))?;
    file.write_all(&buf).map_err(|e| GolError::io(path, e))?;
    file.sync_all().map_err(|e| GolError::io(path, e))?;
    debug!(path = %path.display(), "saved pgm");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ALIVE;

    fn parse(data: &[u8], dims: Dimensions) -> Result<Grid> {
        parse_pgm(Path::new("test.pgm"), data, dims)
    }

    #[test]
    fn test_parse_non_square() {
        let mut data = b"P5\n3 2\n255\n".to_vec();
        data.extend_from_slice(&[0, 0, 255, 255, 0, 0]);
        let grid = parse(&data, Dimensions::new(3, 2)).unwrap();
        assert!(grid.get(2, 0));
        assert!(grid.get(0, 1));
        assert_eq!(grid.alive_count(), 2);
    }

    #[test]
    fn test_pixel_bytes_may_look_like_whitespace() {
        // 0x20 and 0x0a are pixel data here, not separators
        let mut data = b"P5\n2 2\n255\n".to_vec();
        data.extend_from_slice(&[b' ', b'\n', 0, ALIVE]);
        let grid = parse(&data, Dimensions::new(2, 2)).unwrap();
        assert_eq!(grid.alive_count(), 3);
        assert!(!grid.get(0, 1));
    }

    #[test]
    fn test_rejects_bad_headers() {
        let dims = Dimensions::new(2, 2);
        assert!(matches!(
            parse(b"P2\n2 2\n255\n\0\0\0\0", dims),
            Err(GolError::NotPgm { .. })
        ));
        assert!(matches!(
            parse(b"P5\n2 3\n255\n\0\0\0\0\0\0", dims),
            Err(GolError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            parse(b"P5\n2 2\n1\n\0\0\0\0", dims),
            Err(GolError::BitDepth { found: 1, .. })
        ));
        assert!(matches!(
            parse(b"P5\n2 x\n255\n\0\0\0\0", dims),
            Err(GolError::MalformedHeader { .. })
        ));
        assert!(matches!(
            parse(b"P5\n2 2\n255\n\0\0", dims),
            Err(GolError::TruncatedPixels { found: 2, .. })
        ));
        assert!(matches!(parse(b"", dims), Err(GolError::NotPgm { .. })));
    }

    #[test]
    fn test_paths() {
        let dims = Dimensions::new(16, 8);
        assert_eq!(input_path(Path::new("images"), dims), Path::new("images/16x8.pgm"));
        assert_eq!(
            output_path(Path::new("out"), dims, 100),
            Path::new("out/16x8x100.pgm")
        );
    }
}
