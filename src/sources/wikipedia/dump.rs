use std::{fs::File, io::BufReader, path::Path};

use crate::error::Error;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

use super::Page;

/// Dump reader, generic over reader type.
///
/// This genericity enables the same extraction code to run over a whole file,
/// over a byte window of a file (see [super::Chunk]) or over in-memory test data.
///
/// Pages are built from events and handed out as soon as their closing tag is read.
/// The event buffer is cleared after each event, so memory use does not grow with the dump.
pub struct Dump<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    state: PageState,
    done: bool,
}

/// Dump reader over a [File].
impl Dump<BufReader<File>> {
    /// Open a dump file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path.as_ref())?;
        debug!("opened dump {:?}", path.as_ref());
        Ok(Self::new(BufReader::with_capacity(1 << 16, file)))
    }
}

impl<R: BufRead> Dump<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);

        // chunks do not carry the root element, and may carry its closing tag only.
        reader.trim_text(false).check_end_names(false);

        Self {
            reader,
            buf: Vec::new(),
            state: PageState::default(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Text,
}

/// Where we are in the current page.
#[derive(Debug, Default)]
struct PageState {
    in_page: bool,
    in_revision: bool,
    field: Option<Field>,
    title: String,
    body: Option<String>,
}

impl PageState {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"page" => {
                *self = PageState {
                    in_page: true,
                    ..Default::default()
                }
            }
            b"title" if self.in_page && !self.in_revision => self.field = Some(Field::Title),
            b"revision" if self.in_page => self.in_revision = true,
            b"text" if self.in_revision => {
                self.field = Some(Field::Text);
                self.body = Some(String::new());
            }
            _ => (),
        }
    }

    /// `<text/>` means no body.
    fn empty(&mut self, name: &[u8]) {
        if name == b"text" && self.in_revision {
            self.body = None;
        }
    }

    fn push(&mut self, content: &str) {
        match self.field {
            Some(Field::Title) => self.title.push_str(content),
            Some(Field::Text) => self
                .body
                .get_or_insert_with(String::new)
                .push_str(content),
            None => (),
        }
    }

    /// Returns the finished page on `</page>`.
    fn close(&mut self, name: &[u8]) -> Option<Page> {
        match name {
            b"title" | b"text" => {
                self.field = None;
                None
            }
            b"revision" => {
                self.in_revision = false;
                None
            }
            b"page" if self.in_page => {
                let state = std::mem::take(self);
                let body = state.body.filter(|body| !body.is_empty());
                Some(Page::new(state.title, body))
            }
            _ => None,
        }
    }
}

impl<R: BufRead> Iterator for Dump<R> {
    type Item = Result<Page, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    // reader state is unreliable after an error
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };

            match event {
                Event::Start(e) => self.state.open(e.local_name().as_ref()),
                Event::Empty(e) => self.state.empty(e.local_name().as_ref()),
                Event::Text(e) if self.state.field.is_some() => match e.unescape() {
                    Ok(content) => self.state.push(&content),
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e.into()));
                    }
                },
                Event::CData(e) if self.state.field.is_some() => {
                    self.state.push(&String::from_utf8_lossy(&e))
                }
                Event::End(e) => {
                    if let Some(page) = self.state.close(e.local_name().as_ref()) {
                        return Some(Ok(page));
                    }
                }
                Event::Eof => {
                    self.done = true;
                    return if self.state.in_page {
                        let title = std::mem::take(&mut self.state.title);
                        Some(Err(Error::Truncated(title)))
                    } else {
                        None
                    };
                }
                _ => (),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dump;
    use crate::error::Error;
    use crate::sources::wikipedia::Page;

    const DUMP: &str = r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/" xml:lang="fr">
  <siteinfo>
    <sitename>Wikipédia</sitename>
  </siteinfo>
  <page>
    <title>Paris</title>
    <ns>0</ns>
    <revision>
      <id>1</id>
      <text bytes="52" xml:space="preserve">'''Paris''' est la capitale &amp; la plus grande ville.</text>
    </revision>
  </page>
  <page>
    <title>Catégorie:Villes</title>
    <revision>
      <text>[[Catégorie:France]]</text>
    </revision>
  </page>
  <page>
    <title>Vide</title>
    <revision>
      <text bytes="0" />
    </revision>
  </page>
</mediawiki>
"#;

    #[test]
    fn pages() {
        let pages: Vec<Page> = Dump::new(DUMP.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].title(), "Paris");
        assert_eq!(
            pages[0].body(),
            Some("'''Paris''' est la capitale & la plus grande ville.")
        );
        assert_eq!(pages[1].title(), "Catégorie:Villes");
        assert_eq!(pages[2].body(), None);
    }

    #[test]
    fn namespaced_tags() {
        let dump = r#"<mw:page><mw:title>Lyon</mw:title><mw:revision><mw:text>Lyon est une ville.</mw:text></mw:revision></mw:page>"#;
        let pages: Vec<Page> = Dump::new(dump.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(pages, vec![Page::new("Lyon", Some("Lyon est une ville.".to_string()))]);
    }

    #[test]
    fn empty_text_is_absent() {
        let dump = "<page><title>A</title><revision><text></text></revision></page>";
        let page = Dump::new(dump.as_bytes()).next().unwrap().unwrap();
        assert_eq!(page.body(), None);
    }

    #[test]
    fn last_revision_wins() {
        let dump = "<page><title>A</title><revision><text>old</text></revision><revision><text>new</text></revision></page>";
        let page = Dump::new(dump.as_bytes()).next().unwrap().unwrap();
        assert_eq!(page.body(), Some("new"));
    }

    #[test]
    fn truncated() {
        let dump = "<page><title>Fin</title><revision><text>abc";
        let mut d = Dump::new(dump.as_bytes());
        match d.next() {
            Some(Err(Error::Truncated(title))) => assert_eq!(title, "Fin"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(d.next().is_none());
    }

    #[test]
    fn malformed_fuses() {
        let dump = "<page><title>A</title><revision><text>a</text></revision></page><!oops><page><title>B</title></page>";
        let results: Vec<_> = Dump::new(dump.as_bytes()).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(e) => assert!(e.is_source_format()),
            Ok(p) => panic!("unexpected page {:?}", p),
        }
    }

    #[test]
    fn from_path_missing() {
        assert!(Dump::from_path("this/does/not/exist.xml").is_err());
    }
}
