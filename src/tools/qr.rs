//! QR Code Encoder
//!
//! QR Code Model 2 in byte mode, versions 1 through 10, error correction
//! level L or M. Produces the module matrix; drawing is left to the caller
//! (canvas in the browser, half-block text in the terminal).

use std::fmt;

pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EcLevel {
    /// ~7% recovery
    #[default]
    Low,
    /// ~15% recovery
    Medium,
}

impl EcLevel {
    /// Two-bit indicator written into the format information
    fn format_bits(self) -> u16 {
        match self {
            EcLevel::Low => 0b01,
            EcLevel::Medium => 0b00,
        }
    }

    fn blocks(self, version: u8) -> BlockLayout {
        let table = match self {
            EcLevel::Low => &EC_LOW,
            EcLevel::Medium => &EC_MEDIUM,
        };
        table[usize::from(version - 1)]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "L" | "LOW" => Some(EcLevel::Low),
            "M" | "MEDIUM" => Some(EcLevel::Medium),
            _ => None,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EcLevel::Low => "L",
            EcLevel::Medium => "M",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    #[error("Data too long: {len} bytes exceeds {max} bytes at level {level}")]
    DataTooLong { len: usize, max: usize, level: EcLevel },
}

/// Error correction block structure for one version and level
#[derive(Debug, Clone, Copy)]
struct BlockLayout {
    ec_per_block: usize,
    /// (block count, data codewords per block), short blocks first
    groups: [(usize, usize); 2],
}

impl BlockLayout {
    const fn new(ec: usize, n1: usize, d1: usize, n2: usize, d2: usize) -> Self {
        Self {
            ec_per_block: ec,
            groups: [(n1, d1), (n2, d2)],
        }
    }

    fn data_codewords(&self) -> usize {
        self.groups.iter().map(|(n, d)| n * d).sum()
    }
}

const EC_LOW: [BlockLayout; 10] = [
    BlockLayout::new(7, 1, 19, 0, 0),
    BlockLayout::new(10, 1, 34, 0, 0),
    BlockLayout::new(15, 1, 55, 0, 0),
    BlockLayout::new(20, 1, 80, 0, 0),
    BlockLayout::new(26, 1, 108, 0, 0),
    BlockLayout::new(18, 2, 68, 0, 0),
    BlockLayout::new(20, 2, 78, 0, 0),
    BlockLayout::new(24, 2, 97, 0, 0),
    BlockLayout::new(30, 2, 116, 0, 0),
    BlockLayout::new(18, 2, 68, 2, 69),
];

const EC_MEDIUM: [BlockLayout; 10] = [
    BlockLayout::new(10, 1, 16, 0, 0),
    BlockLayout::new(16, 1, 28, 0, 0),
    BlockLayout::new(26, 1, 44, 0, 0),
    BlockLayout::new(18, 2, 32, 0, 0),
    BlockLayout::new(24, 2, 43, 0, 0),
    BlockLayout::new(16, 4, 27, 0, 0),
    BlockLayout::new(18, 4, 31, 0, 0),
    BlockLayout::new(22, 2, 38, 2, 39),
    BlockLayout::new(22, 3, 36, 2, 37),
    BlockLayout::new(26, 4, 43, 1, 44),
];

fn alignment_positions(version: u8) -> &'static [usize] {
    match version {
        2 => &[6, 18],
        3 => &[6, 22],
        4 => &[6, 26],
        5 => &[6, 30],
        6 => &[6, 34],
        7 => &[6, 22, 38],
        8 => &[6, 24, 42],
        9 => &[6, 26, 46],
        10 => &[6, 28, 50],
        _ => &[],
    }
}

fn remainder_bits(version: u8) -> usize {
    match version {
        2..=6 => 7,
        _ => 0,
    }
}

fn char_count_bits(version: u8) -> usize {
    if version <= 9 {
        8
    } else {
        16
    }
}

/// Bits needed for a byte-mode segment of `len` bytes
fn segment_bits(version: u8, len: usize) -> usize {
    4 + char_count_bits(version) + len * 8
}

// ============ Reed-Solomon over GF(256) ============

/// Multiply in GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1
fn gf_mul(x: u8, y: u8) -> u8 {
    let mut z: u16 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x11D);
        z ^= u16::from((y >> i) & 1) * u16::from(x);
    }
    z as u8
}

/// Generator polynomial coefficients (highest degree first, leading 1 dropped)
fn rs_divisor(degree: usize) -> Vec<u8> {
    let mut result = vec![0u8; degree];
    result[degree - 1] = 1;
    let mut root: u8 = 1;
    for _ in 0..degree {
        for j in 0..degree {
            result[j] = gf_mul(result[j], root);
            if j + 1 < degree {
                result[j] ^= result[j + 1];
            }
        }
        root = gf_mul(root, 0x02);
    }
    result
}

/// Error correction codewords for one block
pub fn rs_remainder(data: &[u8], ec_len: usize) -> Vec<u8> {
    let divisor = rs_divisor(ec_len);
    let mut result = vec![0u8; ec_len];
    for &byte in data {
        let factor = byte ^ result[0];
        result.remove(0);
        result.push(0);
        for (r, &d) in result.iter_mut().zip(&divisor) {
            *r ^= gf_mul(d, factor);
        }
    }
    result
}

// ============ BCH codes ============

/// 15-bit format information for a level and mask, already XOR-masked
pub fn format_bits(level: EcLevel, mask: u8) -> u16 {
    let data = (level.format_bits() << 3) | u16::from(mask);
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | (rem & 0x3FF)) ^ 0x5412
}

/// 18-bit version information, only drawn for version 7 and up
pub fn version_bits(version: u8) -> u32 {
    let data = u32::from(version);
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    (data << 12) | (rem & 0xFFF)
}

fn bit<T: Into<u32>>(value: T, i: usize) -> bool {
    (value.into() >> i) & 1 != 0
}

// ============ Encoding ============

#[derive(Default)]
struct BitBuffer(Vec<bool>);

impl BitBuffer {
    fn push(&mut self, value: u32, len: usize) {
        for i in (0..len).rev() {
            self.0.push(bit(value, i));
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn into_bytes(self) -> Vec<u8> {
        self.0
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | (u8::from(b) << (7 - i)))
            })
            .collect()
    }
}

/// Smallest version that fits `len` bytes at `level`
pub fn pick_version(len: usize, level: EcLevel) -> Result<u8, QrError> {
    (MIN_VERSION..=MAX_VERSION)
        .find(|&v| segment_bits(v, len) <= level.blocks(v).data_codewords() * 8)
        .ok_or_else(|| QrError::DataTooLong {
            len,
            max: max_bytes(level),
            level,
        })
}

/// Largest byte payload at `level`
pub fn max_bytes(level: EcLevel) -> usize {
    let bits = level.blocks(MAX_VERSION).data_codewords() * 8;
    (bits - segment_bits(MAX_VERSION, 0)) / 8
}

/// Data codewords: mode, count, payload, terminator and padding
fn data_codewords(data: &[u8], version: u8, level: EcLevel) -> Vec<u8> {
    let capacity = level.blocks(version).data_codewords() * 8;

    let mut bits = BitBuffer::default();
    bits.push(0b0100, 4);
    bits.push(data.len() as u32, char_count_bits(version));
    for &byte in data {
        bits.push(u32::from(byte), 8);
    }

    let terminator = (capacity - bits.len()).min(4);
    bits.push(0, terminator);
    let pad = (8 - bits.len() % 8) % 8;
    bits.push(0, pad);

    let mut bytes = bits.into_bytes();
    for pad in [0xEC, 0x11].into_iter().cycle() {
        if bytes.len() * 8 >= capacity {
            break;
        }
        bytes.push(pad);
    }
    bytes
}

/// Split into blocks, append error correction, interleave
fn interleave(data: &[u8], version: u8, level: EcLevel) -> Vec<u8> {
    let layout = level.blocks(version);

    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::new();
    let mut offset = 0;
    for &(count, len) in &layout.groups {
        for _ in 0..count {
            let block = &data[offset..offset + len];
            blocks.push((block, rs_remainder(block, layout.ec_per_block)));
            offset += len;
        }
    }

    let longest = blocks.iter().map(|(d, _)| d.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(data.len() + blocks.len() * layout.ec_per_block);
    for i in 0..longest {
        out.extend(blocks.iter().filter_map(|(d, _)| d.get(i)));
    }
    for i in 0..layout.ec_per_block {
        out.extend(blocks.iter().map(|(_, ec)| ec[i]));
    }
    out
}

/// An encoded symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    version: u8,
    size: usize,
    level: EcLevel,
    mask: u8,
    modules: Vec<bool>,
    function: Vec<bool>,
}

impl QrCode {
    pub fn encode_text(text: &str, level: EcLevel) -> Result<Self, QrError> {
        Self::encode(text.as_bytes(), level)
    }

    pub fn encode(data: &[u8], level: EcLevel) -> Result<Self, QrError> {
        let version = pick_version(data.len(), level)?;
        let codewords = interleave(&data_codewords(data, version, level), version, level);

        let size = usize::from(version) * 4 + 17;
        let mut qr = QrCode {
            version,
            size,
            level,
            mask: 0,
            modules: vec![false; size * size],
            function: vec![false; size * size],
        };
        qr.draw_function_patterns();
        qr.draw_codewords(&codewords);

        let mut best = (u32::MAX, 0u8);
        for mask in 0..8 {
            qr.apply_mask(mask);
            qr.draw_format(mask);
            let penalty = qr.penalty();
            if penalty < best.0 {
                best = (penalty, mask);
            }
            qr.apply_mask(mask);
        }

        qr.mask = best.1;
        qr.apply_mask(qr.mask);
        qr.draw_format(qr.mask);
        Ok(qr)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn level(&self) -> EcLevel {
        self.level
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x]
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        let idx = y * self.size + x;
        self.modules[idx] = dark;
        self.function[idx] = true;
    }

    fn draw_function_patterns(&mut self) {
        let size = self.size;

        for i in 0..size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }

        self.draw_finder(3, 3);
        self.draw_finder(size - 4, 3);
        self.draw_finder(3, size - 4);

        let positions = alignment_positions(self.version);
        let n = positions.len();
        for (i, &x) in positions.iter().enumerate() {
            for (j, &y) in positions.iter().enumerate() {
                let overlaps_finder =
                    (i == 0 && j == 0) || (i == 0 && j == n - 1) || (i == n - 1 && j == 0);
                if !overlaps_finder {
                    self.draw_alignment(x, y);
                }
            }
        }

        // reserve format areas; real bits are drawn after masking
        self.draw_format(0);
        self.draw_version();
    }

    /// Finder centered at (cx, cy) including its light separator
    fn draw_finder(&mut self, cx: usize, cy: usize) {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let x = cx as i32 + dx;
                let y = cy as i32 + dy;
                if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }

    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let x = (cx as i32 + dx) as usize;
                let y = (cy as i32 + dy) as usize;
                self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    fn draw_format(&mut self, mask: u8) {
        let bits = format_bits(self.level, mask);
        let size = self.size;

        // around the top-left finder
        for i in 0..=5 {
            self.set_function(8, i, bit(bits, i));
        }
        self.set_function(8, 7, bit(bits, 6));
        self.set_function(8, 8, bit(bits, 7));
        self.set_function(7, 8, bit(bits, 8));
        for i in 9..15 {
            self.set_function(14 - i, 8, bit(bits, i));
        }

        // split between the other two finders
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, bit(bits, i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, bit(bits, i));
        }
        self.set_function(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        if self.version < 7 {
            return;
        }
        let bits = version_bits(self.version);
        for i in 0..18 {
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, bit(bits, i));
            self.set_function(b, a, bit(bits, i));
        }
    }

    /// Zigzag placement in two-column strips from the bottom right
    fn draw_codewords(&mut self, codewords: &[u8]) {
        let size = self.size;
        let total_bits = codewords.len() * 8;
        let mut i = 0;
        let mut right = size as i32 - 1;

        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = ((right + 1) & 2) == 0;
            for vert in 0..size {
                let y = if upward { size - 1 - vert } else { vert };
                for j in 0..2 {
                    let x = (right - j) as usize;
                    let idx = y * size + x;
                    if !self.function[idx] && i < total_bits {
                        self.modules[idx] = bit(codewords[i >> 3], 7 - (i & 7));
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(total_bits + remainder_bits(self.version), self.data_module_count());
    }

    fn data_module_count(&self) -> usize {
        self.function.iter().filter(|f| !**f).count()
    }

    /// XOR a mask over the data modules; applying twice undoes it
    fn apply_mask(&mut self, mask: u8) {
        for y in 0..self.size {
            for x in 0..self.size {
                let invert = match mask {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => x * y % 2 + x * y % 3 == 0,
                    6 => (x * y % 2 + x * y % 3) % 2 == 0,
                    _ => ((x + y) % 2 + x * y % 3) % 2 == 0,
                };
                let idx = y * self.size + x;
                if invert && !self.function[idx] {
                    self.modules[idx] = !self.modules[idx];
                }
            }
        }
    }

    fn line(&self, index: usize, horizontal: bool) -> Vec<bool> {
        (0..self.size)
            .map(|k| {
                if horizontal {
                    self.get(k, index)
                } else {
                    self.get(index, k)
                }
            })
            .collect()
    }

    fn penalty(&self) -> u32 {
        const FINDER_A: [bool; 11] = [
            true, false, true, true, true, false, true, false, false, false, false,
        ];
        const FINDER_B: [bool; 11] = [
            false, false, false, false, true, false, true, true, true, false, true,
        ];

        let size = self.size;
        let mut score = 0u32;

        for index in 0..size {
            for horizontal in [true, false] {
                let line = self.line(index, horizontal);

                // runs of five or more
                let mut run = 1;
                for k in 1..=size {
                    if k < size && line[k] == line[k - 1] {
                        run += 1;
                        continue;
                    }
                    if run >= 5 {
                        score += 3 + (run as u32 - 5);
                    }
                    run = 1;
                }

                // finder-like sequences
                score += line
                    .windows(11)
                    .filter(|w| *w == FINDER_A || *w == FINDER_B)
                    .count() as u32
                    * 40;
            }
        }

        // 2x2 blocks
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let c = self.get(x, y);
                if c == self.get(x + 1, y) && c == self.get(x, y + 1) && c == self.get(x + 1, y + 1)
                {
                    score += 3;
                }
            }
        }

        // dark balance
        let dark = self.modules.iter().filter(|m| **m).count();
        let percent = dark * 100 / (size * size);
        score += 10 * (percent.abs_diff(50) / 5) as u32;

        score
    }

    /// Render with Unicode half blocks, two rows per line, dark as `█`
    pub fn to_half_blocks(&self, quiet_zone: usize) -> String {
        let total = self.size + 2 * quiet_zone;
        let at = |x: usize, y: usize| {
            x >= quiet_zone
                && y >= quiet_zone
                && self.get(x - quiet_zone, y - quiet_zone)
        };

        let mut out = String::new();
        for y in (0..total).step_by(2) {
            for x in 0..total {
                let top = at(x, y);
                let bottom = y + 1 < total && at(x, y + 1);
                out.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reed_solomon_vector() {
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        assert_eq!(
            rs_remainder(&data, 10),
            vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(format_bits(EcLevel::Medium, 0), 0b101010000010010);
        assert_eq!(format_bits(EcLevel::Low, 4), 0b110011000101111);
    }

    #[test]
    fn test_version_bits() {
        assert_eq!(version_bits(7), 0b000111110010010100);
    }

    #[test]
    fn test_version_selection() {
        assert_eq!(pick_version(17, EcLevel::Low), Ok(1));
        assert_eq!(pick_version(18, EcLevel::Low), Ok(2));
        assert_eq!(pick_version(14, EcLevel::Medium), Ok(1));
        assert_eq!(pick_version(15, EcLevel::Medium), Ok(2));

        assert_eq!(max_bytes(EcLevel::Low), 271);
        assert!(pick_version(271, EcLevel::Low).is_ok());
        assert!(matches!(
            QrCode::encode(&[b'x'; 272], EcLevel::Low),
            Err(QrError::DataTooLong { len: 272, .. })
        ));
    }

    #[test]
    fn test_data_codewords_padding() {
        let words = data_codewords(b"hi", 1, EcLevel::Low);
        assert_eq!(words.len(), 19);
        // mode 0100, count 00000010, 'h' = 0x68
        assert_eq!(words[0], 0x40);
        assert_eq!(words[1], 0x26);
        assert_eq!(&words[4..6], &[0xEC, 0x11]);
    }

    #[test]
    fn test_finder_and_timing_patterns() {
        let qr = QrCode::encode_text("https://example.com", EcLevel::Low).unwrap();
        let size = qr.size();
        assert_eq!(size, 4 * qr.version() as usize + 17);

        for (ox, oy) in [(0, 0), (size - 7, 0), (0, size - 7)] {
            for i in 0..7 {
                assert!(qr.get(ox + i, oy), "outer ring top");
                assert!(qr.get(ox + i, oy + 6), "outer ring bottom");
            }
            assert!(!qr.get(ox + 1, oy + 1));
            assert!(qr.get(ox + 3, oy + 3));
        }
        assert!(!qr.get(7, 7), "separator");

        for i in 8..size - 8 {
            assert_eq!(qr.get(i, 6), i % 2 == 0);
            assert_eq!(qr.get(6, i), i % 2 == 0);
        }
        assert!(qr.get(8, size - 8), "dark module");
    }

    #[test]
    fn test_alignment_pattern_on_version_two() {
        let qr = QrCode::encode(&[b'a'; 20], EcLevel::Low).unwrap();
        assert_eq!(qr.version(), 2);
        assert!(qr.get(18, 18));
        assert!(!qr.get(17, 18));
        assert!(qr.get(16, 18));
    }

    #[test]
    fn test_format_information_is_readable() {
        let qr = QrCode::encode_text("Orion", EcLevel::Medium).unwrap();
        let expected = format_bits(EcLevel::Medium, qr.mask());

        let mut read = 0u16;
        for i in 0..8 {
            read |= u16::from(qr.get(qr.size() - 1 - i, 8)) << i;
        }
        for i in 8..15 {
            read |= u16::from(qr.get(8, qr.size() - 15 + i)) << i;
        }
        assert_eq!(read, expected);
    }

    #[test]
    fn test_version_information_drawn_from_seven() {
        let qr = QrCode::encode(&[0u8; 150], EcLevel::Low).unwrap();
        assert_eq!(qr.version(), 7);
        let bits = version_bits(7);
        for i in 0..18 {
            assert_eq!(qr.get(qr.size() - 11 + i % 3, i / 3), bit(bits, i));
        }
    }

    #[test]
    fn test_half_block_rendering() {
        let qr = QrCode::encode_text("x", EcLevel::Low).unwrap();
        let text = qr.to_half_blocks(2);
        assert_eq!(text.lines().count(), (21 + 4 + 1) / 2);
        assert!(text.lines().all(|l| l.chars().count() == 25));
    }
}
