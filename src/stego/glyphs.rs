// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Symbol substitution between envelope text and private glyphs.
//!
//! Maps the 64-character base64 alphabet plus `=` and space to
//! non-overlapping Unicode glyphs. Characters outside the domain pass through
//! unchanged in both directions, and the forward and reverse tables are exact
//! inverses by construction (both are derived from [`GLYPH_TABLE`]).
//!
//! This is obfuscation, NOT a second encryption layer — the mapping is public
//! and fixed. It exists so the ciphertext shown to the user (and embedded in
//! the carrier) does not look like base64.
//!
//! Glyph targets are three-byte UTF-8 code points (space excepted), so
//! substitution roughly triples the byte length of the envelope. The bit
//! framer sees the expanded size through the UTF-8 bit expansion, which is
//! what the capacity check accounts against.

/// Substitution table: `(source, glyph)`, one entry per domain character.
/// Space maps to itself.
pub const GLYPH_TABLE: [(char, char); 66] = [
    ('a', '⏃'), ('b', '⏁'), ('c', '☊'), ('d', '⎅'), ('e', '⟒'),
    ('f', '⎎'), ('g', '☌'), ('h', '⊑'), ('i', '⟟'), ('j', '⟊'),
    ('k', '☍'), ('l', '⌰'), ('m', '⋔'), ('n', '⋏'), ('o', '⍒'),
    ('p', '⌿'), ('q', '⍾'), ('r', '⍀'), ('s', '⌇'), ('t', '⏈'),
    ('u', '⎍'), ('v', '⎐'), ('w', '⍙'), ('x', '⌖'), ('y', '⊬'),
    ('z', '⋇'),
    ('0', '⊘'), ('1', '⊳'), ('2', '⊴'), ('3', '⊵'), ('4', '⊶'),
    ('5', '⊷'), ('6', '⊸'), ('7', '⊹'), ('8', '⊺'), ('9', '⊻'),
    ('+', '⊼'), ('/', '⊽'), ('=', '⊾'), (' ', ' '),
    ('A', 'Ⓐ'), ('B', 'Ⓑ'), ('C', 'Ⓒ'), ('D', 'Ⓓ'), ('E', 'Ⓔ'),
    ('F', 'Ⓕ'), ('G', 'Ⓖ'), ('H', 'Ⓗ'), ('I', 'Ⓘ'), ('J', 'Ⓙ'),
    ('K', 'Ⓚ'), ('L', 'Ⓛ'), ('M', 'Ⓜ'), ('N', 'Ⓝ'), ('O', 'Ⓞ'),
    ('P', 'Ⓟ'), ('Q', 'Ⓠ'), ('R', 'Ⓡ'), ('S', 'Ⓢ'), ('T', 'Ⓣ'),
    ('U', 'Ⓤ'), ('V', 'Ⓥ'), ('W', 'Ⓦ'), ('X', 'Ⓧ'), ('Y', 'Ⓨ'),
    ('Z', 'Ⓩ'),
];

fn forward(c: char) -> char {
    GLYPH_TABLE
        .iter()
        .find(|&&(src, _)| src == c)
        .map_or(c, |&(_, glyph)| glyph)
}

fn reverse(c: char) -> char {
    GLYPH_TABLE
        .iter()
        .find(|&&(_, glyph)| glyph == c)
        .map_or(c, |&(src, _)| src)
}

/// Map each character through the forward table; unmapped characters pass
/// through verbatim.
pub fn to_glyphs(text: &str) -> String {
    text.chars().map(forward).collect()
}

/// Invert [`to_glyphs`] with the same pass-through rule.
pub fn from_glyphs(text: &str) -> String {
    text.chars().map(reverse).collect()
}
