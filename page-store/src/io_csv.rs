//! CSV readers and writers for the page and embedding tables.
//!
//! Page table: `title,content,tokens` (extra columns ignored).
//! Embedding table: `title,0,1,…,N-1`, one row per page.
//!
//! Both readers are strict: a malformed row fails the whole load.

use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    embedding_store::EmbeddingStore,
    errors::PageStoreError,
    record::{PageRecord, PageTable},
};

const PAGES: &str = "page";
const EMBEDDINGS: &str = "embedding";

/// Row shape of the page table.
#[derive(Deserialize)]
struct PageRow {
    title: String,
    content: String,
    tokens: usize,
}

/// Reads a page table from any reader.
///
/// # Errors
/// - [`PageStoreError::MissingColumn`] if `title`, `content` or `tokens` is absent
/// - [`PageStoreError::Csv`] on malformed rows or non-integer `tokens`
/// - [`PageStoreError::DuplicateTitle`] on repeated titles
pub fn read_page_table<R: io::Read>(reader: R) -> Result<PageTable, PageStoreError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in ["title", "content", "tokens"] {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(PageStoreError::MissingColumn {
                table: PAGES,
                column: column.to_string(),
            });
        }
    }

    let mut pages = Vec::new();
    for row in rdr.deserialize::<PageRow>() {
        let row = row?;
        pages.push(PageRecord {
            title: row.title,
            content: row.content,
            tokens: row.tokens,
        });
    }

    debug!("Loaded {} pages", pages.len());
    PageTable::new(pages)
}

/// Reads a page table from a file.
pub fn read_page_table_file(path: impl AsRef<Path>) -> Result<PageTable, PageStoreError> {
    info!("Reading page table: {:?}", path.as_ref());
    read_page_table(File::open(path.as_ref())?)
}

/// Reads an embedding table from any reader.
///
/// The dimension is `max numeric column index + 1`; every index below it must
/// be present exactly once. Column order in the file does not matter.
///
/// # Errors
/// - [`PageStoreError::MissingColumn`] if `title` or any index `0..dim` is absent
/// - [`PageStoreError::InvalidHeader`] for non-numeric or repeated columns
/// - [`PageStoreError::InvalidRow`] if a cell is not a float
/// - [`PageStoreError::Csv`] on ragged rows
/// - [`PageStoreError::DuplicateTitle`] on repeated titles
pub fn read_embeddings<R: io::Read>(reader: R) -> Result<EmbeddingStore, PageStoreError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let layout = EmbeddingLayout::from_headers(&headers)?;

    let mut store = EmbeddingStore::with_dimension(layout.dim);
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let title = record.get(layout.title_col).unwrap_or_default().to_string();

        let mut vector = Vec::with_capacity(layout.dim);
        for (i, &col) in layout.value_cols.iter().enumerate() {
            let cell = record.get(col).unwrap_or_default().trim();
            let value = cell.parse::<f32>().map_err(|_| PageStoreError::InvalidRow {
                table: EMBEDDINGS,
                line,
                reason: format!("column {i}: `{cell}` is not a number"),
            })?;
            vector.push(value);
        }
        store.insert(title, vector)?;
    }

    debug!(
        "Loaded {} embeddings of dimension {}",
        store.len(),
        store.dimension()
    );
    Ok(store)
}

/// Reads an embedding table from a file.
pub fn read_embeddings_file(path: impl AsRef<Path>) -> Result<EmbeddingStore, PageStoreError> {
    info!("Reading embedding table: {:?}", path.as_ref());
    read_embeddings(File::open(path.as_ref())?)
}

/// Column positions resolved from the embedding table header.
struct EmbeddingLayout {
    title_col: usize,
    /// `value_cols[i]` is the CSV column holding vector component `i`.
    value_cols: Vec<usize>,
    dim: usize,
}

impl EmbeddingLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, PageStoreError> {
        let mut title_col = None;
        let mut numbered: Vec<(usize, usize)> = Vec::new();

        for (col, name) in headers.iter().enumerate() {
            let name = name.trim();
            if name == "title" {
                if title_col.replace(col).is_some() {
                    return Err(PageStoreError::InvalidHeader {
                        table: EMBEDDINGS,
                        reason: "`title` appears twice".into(),
                    });
                }
                continue;
            }
            let idx = name.parse::<usize>().map_err(|_| PageStoreError::InvalidHeader {
                table: EMBEDDINGS,
                reason: format!("unexpected column `{name}`"),
            })?;
            numbered.push((idx, col));
        }

        let title_col = title_col.ok_or_else(|| PageStoreError::MissingColumn {
            table: EMBEDDINGS,
            column: "title".into(),
        })?;

        // Indices come from the file; never size anything by them before
        // checking they form exactly 0..n.
        numbered.sort_unstable();
        for (expected, &(idx, _)) in numbered.iter().enumerate() {
            if idx == expected {
                continue;
            }
            return Err(if idx < expected {
                PageStoreError::InvalidHeader {
                    table: EMBEDDINGS,
                    reason: format!("column `{idx}` appears twice"),
                }
            } else {
                PageStoreError::MissingColumn {
                    table: EMBEDDINGS,
                    column: expected.to_string(),
                }
            });
        }
        let dim = numbered.len();
        let value_cols: Vec<usize> = numbered.into_iter().map(|(_, col)| col).collect();

        Ok(Self {
            title_col,
            value_cols,
            dim,
        })
    }
}

/// Writes a page table as CSV.
pub fn write_page_table<W: io::Write>(writer: W, pages: &PageTable) -> Result<(), PageStoreError> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for page in pages.iter() {
        wtr.serialize(page)?;
    }
    if pages.is_empty() {
        wtr.write_record(["title", "content", "tokens"])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a page table to a file, creating parent directories.
pub fn write_page_table_file(path: impl AsRef<Path>, pages: &PageTable) -> Result<(), PageStoreError> {
    let file = create_file(path.as_ref())?;
    write_page_table(file, pages)?;
    info!("Wrote {} pages to {:?}", pages.len(), path.as_ref());
    Ok(())
}

/// Writes an embedding table as CSV (`title,0,…,dim-1`).
pub fn write_embeddings<W: io::Write>(
    writer: W,
    store: &EmbeddingStore,
) -> Result<(), PageStoreError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = vec!["title".to_string()];
    header.extend((0..store.dimension()).map(|i| i.to_string()));
    wtr.write_record(&header)?;

    for (title, vector) in store.iter() {
        let mut row = Vec::with_capacity(vector.len() + 1);
        row.push(title.to_string());
        row.extend(vector.iter().map(|v| v.to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes an embedding table to a file, creating parent directories.
pub fn write_embeddings_file(
    path: impl AsRef<Path>,
    store: &EmbeddingStore,
) -> Result<(), PageStoreError> {
    let file = create_file(path.as_ref())?;
    write_embeddings(file, store)?;
    info!("Wrote {} embeddings to {:?}", store.len(), path.as_ref());
    Ok(())
}

fn create_file(path: &Path) -> Result<File, PageStoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_page_table_ignoring_extra_columns() {
        let csv = "title,heading,content,tokens\n\
                   Page 1,Intro,\"Hello, world\",3\n\
                   Page 2,,Second page,2\n";
        let table = read_page_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Page 1").unwrap().content, "Hello, world");
        assert_eq!(table.get("Page 2").unwrap().tokens, 2);
    }

    #[test]
    fn page_table_requires_columns_and_integer_tokens() {
        let err = read_page_table("title,content\nPage 1,x\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PageStoreError::MissingColumn { column, .. } if column == "tokens"
        ));

        let err = read_page_table("title,content,tokens\nPage 1,x,many\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PageStoreError::Csv(_)));
    }

    #[test]
    fn reads_embeddings_in_any_column_order() {
        let csv = "1,title,0\n0.25,Page 1,0.75\n-1,Page 2,0\n";
        let store = read_embeddings(csv.as_bytes()).unwrap();
        assert_eq!(store.dimension(), 2);
        assert_eq!(store.get("Page 1"), Some(&[0.75, 0.25][..]));
        assert_eq!(store.get("Page 2"), Some(&[0.0, -1.0][..]));
    }

    #[test]
    fn dimension_comes_from_widest_index_and_gaps_fail() {
        let err = read_embeddings("title,0,2\nPage 1,1,1\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PageStoreError::MissingColumn { column, .. } if column == "1"
        ));
    }

    #[test]
    fn huge_or_repeated_column_indices_are_header_errors() {
        let err = read_embeddings("title,18446744073709551615\nPage 1,0.5\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            PageStoreError::MissingColumn { column, .. } if column == "0"
        ));

        let err = read_embeddings("title,0,100000000000\nPage 1,0.5,0.5\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            PageStoreError::MissingColumn { column, .. } if column == "1"
        ));

        let err = read_embeddings("title,0,1,0\nPage 1,1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PageStoreError::InvalidHeader { .. }));
    }

    #[test]
    fn bad_cells_and_ragged_rows_are_fatal() {
        let err = read_embeddings("title,0,1\nPage 1,0.1,abc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PageStoreError::InvalidRow { line: 2, .. }));

        let err = read_embeddings("title,0,1\nPage 1,0.1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PageStoreError::Csv(_)));

        let err = read_embeddings("title,0,1\nPage 1,0.1,\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PageStoreError::InvalidRow { .. }));
    }

    #[test]
    fn unknown_or_missing_headers_are_rejected() {
        assert!(matches!(
            read_embeddings("title,0,extra\n".as_bytes()),
            Err(PageStoreError::InvalidHeader { .. })
        ));
        assert!(matches!(
            read_embeddings("0,1\n0.1,0.2\n".as_bytes()),
            Err(PageStoreError::MissingColumn { column, .. }) if column == "title"
        ));
    }

    #[test]
    fn header_only_table_is_empty() {
        let store = read_embeddings("title,0,1,2\n".as_bytes()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.dimension(), 3);
    }

    #[test]
    fn writers_produce_readable_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pages_path = dir.path().join("out/pages.csv");
        let emb_path = dir.path().join("out/embeddings.csv");

        let pages = PageTable::new(vec![
            PageRecord::new("Page 1", "Money, \"quoted\"\nnext line", 7),
            PageRecord::new("Page 2", "Customers", 1),
        ])
        .unwrap();
        let store =
            EmbeddingStore::from_entries([("Page 1", vec![0.5, -0.125]), ("Page 2", vec![0.0, 1.0])])
                .unwrap();

        write_page_table_file(&pages_path, &pages).unwrap();
        write_embeddings_file(&emb_path, &store).unwrap();

        let pages_back = read_page_table_file(&pages_path).unwrap();
        assert_eq!(
            pages_back.get("Page 1").unwrap().content,
            "Money, \"quoted\"\nnext line"
        );
        let store_back = read_embeddings_file(&emb_path).unwrap();
        assert_eq!(store_back.get("Page 1"), Some(&[0.5, -0.125][..]));
        assert_eq!(store_back.dimension(), 2);
    }
}
