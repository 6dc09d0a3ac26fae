// Operator-selected CSV file
use bytes::Bytes;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct CsvFile {
    pub file_name: String,
    pub contents: Bytes,
}

impl CsvFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, contents))
    }

    pub fn has_csv_extension(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_csv_extension() {
        assert!(CsvFile::new("equipment.csv", "a,b").has_csv_extension());
        assert!(CsvFile::new("EQUIPMENT.CSV", "a,b").has_csv_extension());
        assert!(!CsvFile::new("equipment.xlsx", "a,b").has_csv_extension());
        assert!(!CsvFile::new("csv", "a,b").has_csv_extension());
    }

    #[tokio::test]
    async fn test_load_reads_name_and_bytes() {
        let dir = std::env::temp_dir().join(format!("equipviz-csv-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("plant.csv");
        tokio::fs::write(&path, "Type,Flowrate\nPump,12.5\n").await.unwrap();

        let file = CsvFile::load(&path).await.unwrap();
        assert_eq!(file.file_name, "plant.csv");
        assert_eq!(&file.contents[..], b"Type,Flowrate\nPump,12.5\n");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
