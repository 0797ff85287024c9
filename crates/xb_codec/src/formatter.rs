use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

use tracing::debug;
use xb_reflect::{Object, Tagged, TypeRegistry};

use crate::alias::AliasTable;
use crate::error::Error;
use crate::load::{load_root, LoadCtx};
use crate::save::{save_root, SaveCtx};
use crate::secret::SecretBox;
use crate::xml;

// -----------------------------------------------------------------------------
// Formatter

/// Saves and loads documents for a root type `T`.
///
/// A formatter is configured once and then only read: registrations happen
/// before first use, the passphrase is fixed at construction, and all
/// per-call state lives in the call. One formatter can therefore serve any
/// number of concurrent save and load calls.
///
/// Types that may appear in polymorphic slots must be registered with
/// [`register`]; a document naming an unregistered type fails to load, and a
/// graph holding one fails to save.
///
/// # Examples
///
/// ```
/// use xb_codec::Formatter;
/// use xb_reflect::describe;
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Point { x: f64, y: f64 }
///
/// describe! { Point = "Point" { x, y } }
///
/// let formatter = Formatter::<Point>::new();
/// let p = Point { x: 1.5, y: -2.0 };
/// let text = formatter.save_to_string(&p).unwrap();
/// assert_eq!(formatter.load_from_str(&text).unwrap(), p);
/// ```
///
/// [`register`]: Formatter::register
pub struct Formatter<T> {
    secrets: SecretBox,
    registry: TypeRegistry,
    marker: PhantomData<fn() -> T>,
}

impl<T: Object + Tagged + Default> Formatter<T> {
    /// A formatter keyed by the empty passphrase.
    ///
    /// `#[secret]` properties are always concealed; with no passphrase given
    /// they are sealed under the key derived from `""`, so two default
    /// formatters can read each other's documents.
    pub fn new() -> Self {
        Self::with_passphrase("")
    }

    /// A formatter that conceals `#[secret]` properties under `passphrase`.
    ///
    /// Formatters built from the same passphrase can read each other's
    /// documents; one with the wrong passphrase fails loudly.
    pub fn with_passphrase(passphrase: &str) -> Self {
        Self {
            secrets: SecretBox::derive(passphrase),
            registry: TypeRegistry::new(),
            marker: PhantomData,
        }
    }

    /// Allows `D` in polymorphic slots, under its document tag.
    pub fn register<D: Object + Tagged + Default>(&mut self) -> &mut Self {
        self.registry.register::<D>();
        self
    }

    /// Writes `value` as a document into `sink`.
    pub fn save<W: Write>(&self, value: &T, sink: W) -> Result<(), Error> {
        debug!(tag = T::TAG, "saving document");
        let mut ctx = SaveCtx {
            aliases: AliasTable::new(),
            ns_needed: false,
            secrets: &self.secrets,
            registry: &self.registry,
        };
        let root = save_root(value, &mut ctx)?;
        xml::write_document(&root, sink)
    }

    pub fn save_to_string(&self, value: &T) -> Result<String, Error> {
        let mut out = Vec::new();
        self.save(value, &mut out)?;
        String::from_utf8(out).map_err(|_| Error::Malformed("document is not valid UTF-8".into()))
    }

    pub fn save_to_file(&self, value: &T, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut sink = BufWriter::new(file);
        self.save(value, &mut sink)?;
        sink.flush()?;
        Ok(())
    }

    /// Reads one document from `source` into a fresh `T`.
    pub fn load<R: BufRead>(&self, source: R) -> Result<T, Error> {
        debug!(tag = T::TAG, "loading document");
        let root = xml::parse_document(source)?;
        let mut ctx = LoadCtx {
            aliases: AliasTable::new(),
            secrets: &self.secrets,
            registry: &self.registry,
        };
        load_root::<T>(&root, &mut ctx)
    }

    pub fn load_from_str(&self, text: &str) -> Result<T, Error> {
        self.load(text.as_bytes())
    }

    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<T, Error> {
        self.load(BufReader::new(File::open(path)?))
    }
}

impl<T: Object + Tagged + Default> Default for Formatter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use xb_reflect::describe;

    use super::*;

    #[derive(Default)]
    struct Unit {
        id: u32,
    }

    describe! { Unit = "Unit" { id } }

    #[test]
    fn formatters_are_shareable_across_threads() {
        fn assert_sync<S: Send + Sync>() {}
        assert_sync::<Formatter<Unit>>();
    }

    #[test]
    fn save_writes_into_any_sink() {
        let formatter = Formatter::<Unit>::new();
        let mut out = Vec::new();
        formatter.save(&Unit { id: 3 }, &mut out).unwrap();
        assert!(out.starts_with(b"<?xml"));
    }
}
