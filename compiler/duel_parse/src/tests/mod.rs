mod parser;
mod roundtrip;
