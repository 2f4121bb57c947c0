//! Byte-range windows over a dump.
//!
//! A dump is split into `n` windows of equal size, that do not care about page boundaries.
//! Each window is then resolved into a parseable byte range, following one rule:
//! **a page belongs to the window in which its opening `page` tag starts.**
//!
//! - the start of a window is moved forward to the first marker it contains
//!   (the first window keeps offset 0, so that the dump header is read and ignored),
//! - the end of a window is moved forward to the first marker found at or after it
//!   (the last window ends at the end of file).
//!
//! Since the end of window `i` and the start of window `i+1` are found by the same forward scan,
//! resolved ranges never overlap and cover every page once.
//!
//! The forward scan past the end of a window is bounded (see [Chunk::resolve]).
//!
//! Page tags carry the prefix of the root element, if any (`<mw:page>` under `<mw:mediawiki>`),
//! see [RecordMarker::detect].
use std::{
    fs::File,
    io::{BufRead, BufReader, Read, Seek, SeekFrom, Take},
    ops::Range,
    path::Path,
};

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Error;

use super::Dump;

/// Opening tag of a page, as it appears in raw dumps.
pub const RECORD_OPEN: &[u8] = b"<page";

const BLOCK_SIZE: usize = 1 << 16;

/// Reader over the resolved byte range of a chunk.
pub type ChunkReader = BufReader<Take<File>>;

/// Raw opening tag of a page: `<page` or `<prefix:page`,
/// followed by `>` or whitespace (attributes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMarker(Vec<u8>);

impl Default for RecordMarker {
    fn default() -> Self {
        Self(RECORD_OPEN.to_vec())
    }
}

impl RecordMarker {
    pub fn new(prefix: Option<&[u8]>) -> Self {
        match prefix {
            Some(prefix) if !prefix.is_empty() => {
                let mut tag = b"<".to_vec();
                tag.extend_from_slice(prefix);
                tag.extend_from_slice(b":page");
                Self(tag)
            }
            _ => Self::default(),
        }
    }

    /// Build the marker from the prefix of the root element.
    ///
    /// Falls back to the unprefixed marker when the document has no element at all.
    pub fn detect<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut reader = Reader::from_reader(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) => {
                    let marker = Self::new(e.name().prefix().as_ref().map(|p| p.as_ref()));
                    debug!("record marker: {}", String::from_utf8_lossy(&marker.0));
                    return Ok(marker);
                }
                Event::Eof => return Ok(Self::default()),
                _ => (),
            }
        }
    }

    /// Length of a match, delimiter included.
    fn len(&self) -> usize {
        self.0.len() + 1
    }

    /// `candidate` is exactly [RecordMarker::len] bytes long.
    fn matches(&self, candidate: &[u8]) -> bool {
        match candidate.split_last() {
            Some((&delimiter, tag)) => {
                tag == self.0.as_slice() && (delimiter == b'>' || delimiter.is_ascii_whitespace())
            }
            None => false,
        }
    }
}

/// A nominal byte window of a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub start: u64,
    pub end: u64,
    pub last: bool,
}

/// Outcome of a bounded marker scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Absolute offset of the first marker.
    Found(u64),
    /// End of file reached without finding a marker.
    Eof,
    /// Scan limit reached without finding a marker.
    Exhausted,
}

impl Chunk {
    /// Split `len` bytes into `n` windows of `len / n` bytes.
    /// The last one absorbs the remainder.
    ///
    /// `n` is clamped into `[1, max(len, 1)]`.
    pub fn split(len: u64, n: usize) -> Vec<Chunk> {
        let n = (n.max(1) as u64).min(len.max(1));
        let size = len / n;

        (0..n)
            .map(|i| {
                let last = i == n - 1;
                Chunk {
                    index: i as usize,
                    start: i * size,
                    end: if last { len } else { (i + 1) * size },
                    last,
                }
            })
            .collect()
    }

    /// Resolve the nominal window into the byte range of the pages it owns.
    ///
    /// Returns `None` if no page starts inside the window.
    /// Fails with [Error::Resync] if the next marker after the window end
    /// is further than `max_resync` bytes.
    pub fn resolve<R: Read + Seek>(
        &self,
        reader: &mut R,
        marker: &RecordMarker,
        max_resync: u64,
    ) -> Result<Option<Range<u64>>, Error> {
        let start = if self.start == 0 {
            0
        } else {
            match find_marker(reader, marker, self.start, Some(self.end - self.start))? {
                Scan::Found(pos) => pos,
                Scan::Eof | Scan::Exhausted => return Ok(None),
            }
        };

        let end = if self.last {
            self.end
        } else {
            match find_marker(reader, marker, self.end, Some(max_resync))? {
                Scan::Found(pos) => pos,
                Scan::Eof => reader.seek(SeekFrom::End(0))?,
                Scan::Exhausted => {
                    return Err(Error::Resync {
                        chunk: self.index,
                        distance: max_resync,
                    })
                }
            }
        };

        debug!(
            "chunk {}: [{}, {}) resolved to [{}, {})",
            self.index, self.start, self.end, start, end
        );

        Ok(Some(start..end))
    }

    /// Open the dump with a fresh handle and stream the pages owned by this chunk.
    pub fn open<P: AsRef<Path>>(
        &self,
        path: P,
        marker: &RecordMarker,
        max_resync: u64,
    ) -> Result<Option<Dump<ChunkReader>>, Error> {
        let mut file = File::open(path)?;
        let range = match self.resolve(&mut file, marker, max_resync)? {
            Some(range) => range,
            None => return Ok(None),
        };

        file.seek(SeekFrom::Start(range.start))?;
        let window = file.take(range.end - range.start);
        Ok(Some(Dump::new(BufReader::with_capacity(BLOCK_SIZE, window))))
    }
}

/// Find the first `marker` that starts in `[from, from + limit)`.
///
/// Reads by blocks, keeping enough bytes between blocks to catch markers
/// that straddle two of them.
pub fn find_marker<R: Read + Seek>(
    reader: &mut R,
    marker: &RecordMarker,
    from: u64,
    limit: Option<u64>,
) -> Result<Scan, Error> {
    let marker_len = marker.len();
    let within = |pos: u64| limit.map_or(true, |limit| pos < from + limit);

    reader.seek(SeekFrom::Start(from))?;

    let mut block = vec![0u8; BLOCK_SIZE];
    let mut window: Vec<u8> = Vec::with_capacity(BLOCK_SIZE + marker_len);

    // absolute offset of window[0]
    let mut base = from;

    loop {
        let read = reader.read(&mut block)?;
        if read == 0 {
            return Ok(Scan::Eof);
        }
        window.extend_from_slice(&block[..read]);

        if let Some(idx) = window
            .windows(marker_len)
            .position(|candidate| marker.matches(candidate))
        {
            let pos = base + idx as u64;
            return Ok(if within(pos) {
                Scan::Found(pos)
            } else {
                Scan::Exhausted
            });
        }

        let drained = window.len().saturating_sub(marker_len - 1);
        window.drain(..drained);
        base += drained as u64;

        if !within(base) {
            return Ok(Scan::Exhausted);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::{find_marker, Chunk, RecordMarker, Scan};
    use crate::error::Error;
    use crate::sources::wikipedia::{Dump, Page};

    fn dump(nb_pages: usize) -> String {
        let mut d = String::from("<mediawiki>\n  <siteinfo><sitename>Wikipédia</sitename></siteinfo>\n");
        for i in 0..nb_pages {
            d.push_str(&format!(
                "  <page>\n    <title>Page {i}</title>\n    <revision><text>Texte numéro {i}.</text></revision>\n  </page>\n"
            ));
        }
        d.push_str("</mediawiki>\n");
        d
    }

    #[test]
    fn split_covers_everything() {
        let chunks = Chunk::split(103, 4);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[1].start, 25);
        assert_eq!(chunks[3].end, 103);
        assert!(chunks[3].last);
        for w in chunks.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
    }

    #[test]
    fn split_clamps() {
        assert_eq!(Chunk::split(3, 10).len(), 3);
        assert_eq!(Chunk::split(10, 0).len(), 1);
        let empty = Chunk::split(0, 4);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].start, 0);
        assert_eq!(empty[0].end, 0);
    }

    #[test]
    fn marker_across_blocks() {
        // marker straddles the first block boundary
        let mut data = vec![b'x'; super::BLOCK_SIZE - 3];
        data.extend_from_slice(b"<page>rest");
        let mut cursor = Cursor::new(data);
        assert_eq!(
            find_marker(&mut cursor, &RecordMarker::default(), 0, None).unwrap(),
            Scan::Found(super::BLOCK_SIZE as u64 - 3)
        );
    }

    #[test]
    fn marker_limits() {
        let marker = RecordMarker::default();
        let mut cursor = Cursor::new(b"0123456789<page>".to_vec());
        assert_eq!(find_marker(&mut cursor, &marker, 0, Some(11)).unwrap(), Scan::Found(10));
        assert_eq!(find_marker(&mut cursor, &marker, 0, Some(10)).unwrap(), Scan::Exhausted);
        assert_eq!(find_marker(&mut cursor, &marker, 11, None).unwrap(), Scan::Eof);
    }

    #[test]
    fn marker_needs_a_delimiter() {
        let marker = RecordMarker::default();
        let mut cursor = Cursor::new(b"<pages><pageid>1</pageid><page id=\"2\">".to_vec());
        assert_eq!(find_marker(&mut cursor, &marker, 0, None).unwrap(), Scan::Found(25));

        let mut cursor = Cursor::new(b"<page\n>".to_vec());
        assert_eq!(find_marker(&mut cursor, &marker, 0, None).unwrap(), Scan::Found(0));
    }

    #[test]
    fn prefixed_marker() {
        let root = "<?xml version=\"1.0\"?>\n<mw:mediawiki xmlns:mw=\"http://www.mediawiki.org/xml/export-0.10/\">";
        let marker = RecordMarker::detect(root.as_bytes()).unwrap();
        assert_eq!(marker, RecordMarker::new(Some(&b"mw"[..])));

        let mut cursor = Cursor::new(b"<page><mw:page>".to_vec());
        assert_eq!(find_marker(&mut cursor, &marker, 0, None).unwrap(), Scan::Found(6));

        let plain = RecordMarker::detect("<mediawiki xml:lang=\"fr\">".as_bytes()).unwrap();
        assert_eq!(plain, RecordMarker::default());
        assert_eq!(RecordMarker::detect("".as_bytes()).unwrap(), RecordMarker::default());
    }

    #[test]
    fn chunks_recover_every_page_once() {
        let d = dump(37);
        let expected: Vec<Page> = Dump::new(d.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(d.as_bytes()).unwrap();
        let len = d.len() as u64;

        for n in 1..=20 {
            let mut pages = Vec::new();
            for chunk in Chunk::split(len, n) {
                if let Some(dump) = chunk.open(file.path(), &RecordMarker::default(), len).unwrap() {
                    for page in dump {
                        pages.push(page.unwrap());
                    }
                }
            }
            assert_eq!(pages, expected, "with {} chunks", n);
        }
    }

    #[test]
    fn resync_is_bounded() {
        let d = dump(2);
        let mut cursor = Cursor::new(d.as_bytes().to_vec());
        let chunks = Chunk::split(d.len() as u64, 2);

        // second page marker is more than 1 byte away from the middle of the file
        let first = chunks[0];
        match first.resolve(&mut cursor, &RecordMarker::default(), 1) {
            Err(Error::Resync { chunk, distance }) => {
                assert_eq!(chunk, 0);
                assert_eq!(distance, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
