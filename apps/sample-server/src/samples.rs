//! Documents bundled with the application, signed when a request does not
//! upload its own content.

pub const SAMPLE_PDF: &[u8] = include_bytes!("../assets/sample.pdf");
pub const SAMPLE_XML: &[u8] = include_bytes!("../assets/sample.xml");
pub const SAMPLE_NFE: &[u8] = include_bytes!("../assets/sample-nfe.xml");

/// Id of the `infNFe` element inside [`SAMPLE_NFE`].
pub const SAMPLE_NFE_ELEMENT_ID: &str = "NFe35141214314050000662550010001084271182362300";
