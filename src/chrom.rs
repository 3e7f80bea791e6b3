use std::fmt;

use log::warn;
use rustc_hash::FxHashMap;

use crate::coord::{Coord, Strand};
use crate::errors::CoordError;

/// Dense ordering key of a chromosome inside one [`ChromosomeRegistry`].
///
/// Ids are handed out from 1 in registry order, so comparing ids compares
/// chromosomes in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChromId(pub u32);

impl fmt::Display for ChromId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category flags of a chromosome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromFlags {
    pub is_auto: bool,
    pub is_sex: bool,
    pub is_x: bool,
    pub is_y: bool,
    pub is_hap: bool,
    pub is_mito: bool,
    pub is_rand: bool,
}

impl ChromFlags {
    pub fn autosome() -> Self {
        ChromFlags {
            is_auto: true,
            ..Default::default()
        }
    }

    /// Guess the category of a chromosome from a UCSC-style name.
    pub fn from_name(name: &str) -> Self {
        let mut flags = ChromFlags::default();
        let lc_name = name.to_lowercase();
        let after_chr = lc_name.strip_prefix("chr").unwrap_or("");

        match after_chr.chars().next() {
            Some(c) if c.is_ascii_digit() => flags.is_auto = true,
            Some(c @ 'w'..='z') => {
                flags.is_sex = true;
                flags.is_x = c == 'x';
                flags.is_y = c == 'y';
            }
            _ if after_chr.starts_with('m') => flags.is_mito = true,
            _ if after_chr.starts_with("un") || after_chr.starts_with("ur") => {
                flags.is_rand = true
            }
            _ => {
                warn!(
                    "could not determine chromosome type (autosome, sex, mitochondrial) \
                     from name '{}'. Assuming 'random'",
                    name
                );
                flags.is_rand = true;
            }
        }

        if name.contains("rand") {
            flags.is_rand = true;
        }
        if name.contains("hap") {
            flags.is_hap = true;
        }

        flags
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    pub idnum: ChromId,
    pub name: String,
    pub length: i64,
    pub flags: ChromFlags,
}

impl Chromosome {
    pub fn new(idnum: ChromId, name: impl Into<String>, length: i64) -> Self {
        Chromosome {
            idnum,
            name: name.into(),
            length,
            flags: ChromFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: ChromFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Which chromosome categories [`ChromosomeRegistry::fetch_by_type`] keeps.
///
/// A chromosome is returned unless one of its set flags belongs to a
/// category switched off here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromFilter {
    pub rand: bool,
    pub auto: bool,
    pub sex: bool,
    pub x: bool,
    pub y: bool,
    pub hap: bool,
    pub mito: bool,
}

impl Default for ChromFilter {
    fn default() -> Self {
        ChromFilter {
            rand: false,
            auto: true,
            sex: true,
            x: true,
            y: false,
            hap: false,
            mito: false,
        }
    }
}

impl ChromFilter {
    pub fn all() -> Self {
        ChromFilter {
            rand: true,
            auto: true,
            sex: true,
            x: true,
            y: true,
            hap: true,
            mito: true,
        }
    }

    pub fn accepts(&self, flags: &ChromFlags) -> bool {
        let excluded = [
            (self.rand, flags.is_rand),
            (self.auto, flags.is_auto),
            (self.sex, flags.is_sex),
            (self.x, flags.is_x),
            (self.y, flags.is_y),
            (self.hap, flags.is_hap),
            (self.mito, flags.is_mito),
        ];
        excluded.iter().all(|&(wanted, set)| wanted || !set)
    }
}

/// Sort key placing plain autosomes first, numerically ordered.
fn chrom_key(name: &str, flags: &ChromFlags) -> (bool, bool, bool, bool, String) {
    let digits: String = name
        .strip_prefix("chr")
        .map(|rest| rest.chars().take_while(|c| c.is_ascii_digit()).collect())
        .unwrap_or_default();

    let name_key = if digits.is_empty() {
        name.to_string()
    } else {
        format!("{:0>3}", digits)
    };

    (flags.is_hap, flags.is_rand, flags.is_mito, flags.is_sex, name_key)
}

/// Owns every [`Chromosome`] of an assembly. Coords refer back to their
/// chromosome by [`ChromId`].
///
/// Build the registry completely before sharing it between threads; after
/// that it is only read.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeRegistry {
    chroms: Vec<Chromosome>,
    by_name: FxHashMap<String, ChromId>,
}

impl ChromosomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register chromosomes from `(name, length)` pairs (a chromInfo table),
    /// inferring category flags and assigning ids in canonical order.
    pub fn from_chrom_sizes<I, S>(sizes: I) -> Result<Self, CoordError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, i64, ChromFlags)> = sizes
            .into_iter()
            .map(|(name, length)| {
                let name = name.into();
                let flags = ChromFlags::from_name(&name);
                (name, length, flags)
            })
            .collect();

        entries.sort_by_cached_key(|(name, _, flags)| chrom_key(name, flags));

        let mut registry = Self::new();
        for (name, length, flags) in entries {
            registry.push(name, length, flags)?;
        }
        Ok(registry)
    }

    pub fn push(
        &mut self,
        name: impl Into<String>,
        length: i64,
        flags: ChromFlags,
    ) -> Result<ChromId, CoordError> {
        let name = name.into();
        if length < 1 {
            return Err(CoordError::InvalidChromLength { name, length });
        }
        if self.by_name.contains_key(&name) {
            return Err(CoordError::DuplicateChromosome(name));
        }

        let idnum = ChromId(self.chroms.len() as u32 + 1);
        self.by_name.insert(name.clone(), idnum);
        self.chroms
            .push(Chromosome::new(idnum, name, length).with_flags(flags));
        Ok(idnum)
    }

    pub fn len(&self) -> usize {
        self.chroms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.is_empty()
    }

    pub fn get(&self, idnum: ChromId) -> Option<&Chromosome> {
        (idnum.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.chroms.get(i))
    }

    pub fn by_name(&self, name: &str) -> Result<&Chromosome, CoordError> {
        self.by_name
            .get(name)
            .and_then(|&idnum| self.get(idnum))
            .ok_or_else(|| CoordError::UnknownChromosome(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.chroms.iter()
    }

    pub fn fetch_by_type<'a>(
        &'a self,
        filter: &'a ChromFilter,
    ) -> impl Iterator<Item = &'a Chromosome> + 'a {
        self.chroms.iter().filter(move |c| filter.accepts(&c.flags))
    }

    /// Build a validated coord on the named chromosome.
    pub fn coord(
        &self,
        name: &str,
        start: i64,
        end: i64,
        strand: Strand,
    ) -> Result<Coord, CoordError> {
        Coord::new(self.by_name(name)?, start, end, strand)
    }

    /// Render a coord with its chromosome name, e.g. `chr1:10-20(+)`.
    pub fn label(&self, coord: &Coord) -> String {
        let chrom = match self.get(coord.chrom()) {
            Some(c) => c.name.clone(),
            None => coord.chrom().to_string(),
        };
        let id_str = coord
            .idnum()
            .map(|id| format!("{} ", id))
            .unwrap_or_default();
        format!(
            "{}{}:{}-{}({})",
            id_str,
            chrom,
            coord.start(),
            coord.end(),
            coord.strand()
        )
    }
}
