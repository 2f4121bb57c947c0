/*! MediaWiki XML dumps.

A dump is a single (very large) XML document made of `page` elements:

```xml
<mediawiki>
  <page>
    <title>Paris</title>
    <revision>
      <text>'''Paris''' est la capitale de la France.</text>
    </revision>
  </page>
</mediawiki>
```

[Dump] streams pages out of any [std::io::BufRead], [Chunk] splits the raw bytes of a dump
into independently parseable windows.
!*/
mod chunk;
mod dump;
mod page;

pub use chunk::{find_marker, Chunk, ChunkReader, RecordMarker, Scan, RECORD_OPEN};
pub use dump::Dump;
pub use page::Page;
