//! Dump to encoded corpus, through every command.
use std::fs;
use std::io::Write;

use stenocorpus::io::corpus::read_entries_from_path;
use stenocorpus::io::encoded::read_rows;
use stenocorpus::pipelines::{
    Extraction, ExtractionConfig, Pipeline, Revalidation, StrategyKind, Translation,
};
use stenocorpus::translate::CodeIndex;

const DUMP: &str = r#"<mediawiki>
  <page>
    <title>Chat</title>
    <revision>
      <text>Le [[chat]] noir dort sur le tapis. Le chat mange 2 souris.
== Voir aussi ==
* [[Chien]]
[[Catégorie:Félin]]</text>
    </revision>
  </page>
  <page>
    <title>Modèle:Infobox</title>
    <revision><text>Le chat noir dort sur le tapis.</text></revision>
  </page>
</mediawiki>
"#;

const LEXICON: &str = "le :: HR-\nchat :: KAT\nnoir :: NWR\ndort :: TKORT\nsur :: SUR\ntapis :: TA PEU\n";

#[test_log::test]
fn dump_to_encoded_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml");
    fs::File::create(&dump)
        .unwrap()
        .write_all(DUMP.as_bytes())
        .unwrap();
    let lexicon = dir.path().join("lexicon.txt");
    fs::write(&lexicon, LEXICON).unwrap();

    let corpus = dir.path().join("corpus.csv");
    let extraction = Extraction::new(
        dump,
        corpus.clone(),
        StrategyKind::Shards,
        ExtractionConfig {
            workers: 2,
            ..Default::default()
        },
    )
    .run()
    .unwrap();
    assert_eq!(extraction.pages, 2);
    assert_eq!(extraction.excluded, 1);
    assert_eq!(extraction.kept, 2);

    let sentences: Vec<String> = read_entries_from_path(&corpus)
        .unwrap()
        .into_iter()
        .map(|e| e.sentence)
        .collect();
    assert_eq!(
        sentences,
        vec![
            "Le chat noir dort sur le tapis.",
            "Le chat mange deux souris."
        ]
    );

    let revalidated = dir.path().join("revalidated.csv");
    let revalidation = Revalidation::new(corpus, revalidated.clone(), 2, 0)
        .run()
        .unwrap();
    assert_eq!(revalidation.kept, 2);

    let encoded = dir.path().join("encoded.csv");
    let missing = dir.path().join("missing.csv");
    let translation = Translation::new(lexicon.clone(), revalidated, encoded.clone())
        .with_missing(Some(missing.clone()))
        .run()
        .unwrap();
    assert_eq!(translation.translated, 1);
    assert_eq!(translation.failed, 1);

    let rows = read_rows(fs::File::open(&encoded).unwrap()).unwrap();
    assert_eq!(
        rows[0].encoded.as_deref(),
        Some("HR- KAT NWR TKORT SUR HR- TA PEU.")
    );
    assert_eq!(rows[1].encoded, None);
    assert_eq!(
        fs::read_to_string(&missing).unwrap(),
        "word,count\ndeux,1\nmange,1\nsouris,1\n"
    );

    let index = CodeIndex::from_path(&lexicon).unwrap();
    assert_eq!(index.codes().len(), 7);
    assert_eq!(index.get("PEU"), Some(6));
}
