//! CoNLL-U reader.
//!
//! Turns parser output into [`DependencyTree`]s plus the seed entities
//! annotated on each sentence. Two line layouts are accepted:
//!
//! ```text
//! ID FORM LEMMA UPOS XPOS FEATS HEAD DEPREL DEPS MISC    (CoNLL-U, 10 columns)
//! ID FORM LEMMA TAG HEAD DEPREL [ENTITY]                 (compact, 6 or 7 columns)
//! ```
//!
//! Columns are tab-separated. Ids are 1-based and `HEAD = 0` marks the root.
//! The tag is XPOS, falling back to UPOS when XPOS is `_`. A token's entity
//! type comes from `Entity=TYPE` in MISC (or the 7th compact column; `_` and
//! `O` mean none). Multiword ranges (`3-4`) and empty nodes (`5.1`) are
//! skipped.
//!
//! Sentence-level comments:
//!
//! ```text
//! # sent_id = s42
//! # entity = 3-4 CHEMICAL       (1-based, inclusive token ids)
//! ```

use crate::error::{ExpansionError, Result, SentenceId};
use crate::{DependencyTree, Entity, TreeBuilder};

/// One parsed sentence and its seed entities.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub tree: DependencyTree,
    pub entities: Vec<Entity>,
}

/// Parse a single sentence. Blank lines are ignored.
pub fn parse_sentence(input: &str) -> Result<(DependencyTree, Vec<Entity>)> {
    let lines: Vec<(usize, &str)> = input.lines().enumerate().map(|(i, l)| (i + 1, l)).collect();
    let sentence = parse_block(&lines)?;
    Ok((sentence.tree, sentence.entities))
}

/// Parse a document of blank-line separated sentences.
pub fn parse_document(input: &str) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();
    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                sentences.push(parse_block(&block)?);
                block.clear();
            }
            continue;
        }
        block.push((i + 1, line));
    }
    if !block.is_empty() {
        sentences.push(parse_block(&block)?);
    }
    tracing::debug!(sentences = sentences.len(), "conll document parsed");
    Ok(sentences)
}

fn error(line: usize, message: impl Into<String>) -> ExpansionError {
    ExpansionError::Conll { line, message: message.into() }
}

fn parse_block(lines: &[(usize, &str)]) -> Result<Sentence> {
    let mut builder = TreeBuilder::new();
    let mut id = SentenceId::anonymous();
    let mut annotated: Vec<(usize, Entity)> = Vec::new();
    let mut tokens = 0usize;

    for &(number, raw) in lines {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if let Some(caps) = regex!(r"^#\s*sent_id\s*=\s*(\S+)\s*$").captures(line) {
                id = SentenceId::new(&caps[1]);
            } else if let Some(caps) = regex!(r"^#\s*entity\s*=\s*(\d+)-(\d+)\s+(\S+)\s*$").captures(line) {
                let first: usize = caps[1].parse().map_err(|_| error(number, "entity id is too large"))?;
                let last: usize = caps[2].parse().map_err(|_| error(number, "entity id is too large"))?;
                if first == 0 || last < first {
                    return Err(error(number, format!("invalid entity range {first}-{last}")));
                }
                annotated.push((number, Entity::new(first - 1, last, &caps[3])));
            }
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        let Some(&token_id) = columns.first() else { continue };
        if regex!(r"^\d+(-\d+|\.\d+)$").is_match(token_id) {
            continue;
        }
        if !regex!(r"^\d+$").is_match(token_id) {
            return Err(error(number, format!("malformed token id '{token_id}'")));
        }

        let row = match columns.len() {
            10 => Row {
                form: columns[1],
                lemma: columns[2],
                tag: if columns[4] == "_" { columns[3] } else { columns[4] },
                head: columns[6],
                deprel: columns[7],
                entity: misc_entity(columns[9]),
            },
            6 | 7 => Row {
                form: columns[1],
                lemma: columns[2],
                tag: columns[3],
                head: columns[4],
                deprel: columns[5],
                entity: columns.get(6).copied().filter(|e| !matches!(*e, "_" | "O" | "")),
            },
            n => return Err(error(number, format!("expected 6, 7 or 10 columns, found {n}"))),
        };

        tokens += 1;
        if token_id.parse::<usize>().ok() != Some(tokens) {
            return Err(error(number, format!("expected token id {tokens}, found '{token_id}'")));
        }
        let lemma = if row.lemma == "_" { row.form } else { row.lemma };
        let index = builder.token(row.form, lemma, row.tag);
        if let Some(entity_type) = row.entity {
            builder.entity_type(index, entity_type);
        }
        let head: usize = row.head.parse().map_err(|_| error(number, format!("malformed head '{}'", row.head)))?;
        if head > 0 {
            builder.attach(index, head - 1, row.deprel);
        }
    }

    if tokens == 0 {
        let line = lines.first().map(|(n, _)| *n).unwrap_or(0);
        return Err(error(line, "sentence has no tokens"));
    }

    builder.set_id(id);
    let tree = builder.build()?;
    let mut entities = Vec::with_capacity(annotated.len());
    for (_, entity) in annotated {
        tree.check_entity(&entity)?;
        entities.push(entity);
    }
    Ok(Sentence { tree, entities })
}

struct Row<'a> {
    form: &'a str,
    lemma: &'a str,
    tag: &'a str,
    head: &'a str,
    deprel: &'a str,
    entity: Option<&'a str>,
}

fn misc_entity(misc: &str) -> Option<&str> {
    misc.split('|').find_map(|field| field.strip_prefix("Entity=")).filter(|e| !e.is_empty())
}
