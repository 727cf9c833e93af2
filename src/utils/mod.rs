pub mod id_encoding;
