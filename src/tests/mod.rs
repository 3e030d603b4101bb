mod vectors;

#[test]
fn ex_readme_examples() -> std::io::Result<()> {
    use std::io::prelude::*;

    use super::{DecodingReader, EncodingWriter};

    let raw: &[u8] = b"Hello!!";
    let b45: &[u8] = b"%69 VD92EX0";

    let mut reader = DecodingReader::new(b45);
    let mut writer = EncodingWriter::new(Vec::new());

    let mut decoded = Vec::new();
    reader.read_to_end(&mut decoded)?;
    assert_eq!(decoded, raw);

    writer.write_all(&decoded)?;
    writer.close()?;
    assert_eq!(writer.writer_ref(), b45);

    Ok(())
}
