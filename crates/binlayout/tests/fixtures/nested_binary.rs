impl NestedBinary {
    pub fn decode(buffer: &[u8]) -> ::core::result::Result<(Self, usize), ::binlayout::CodecError> {
        ::binlayout::wire::require(buffer.len(), 16)?;
        let (symbol_name, len_1) = ::binlayout::wire::decode_nested(buffer, 0, SymbolName::decode)?;
        ::binlayout::wire::require(buffer.len(), 16 + len_1)?;
        let a = ::binlayout::wire::read::<u32>(buffer, len_1, ::binlayout::ByteOrder::Little)?;
        let b = ::binlayout::wire::read::<i32>(buffer, 4 + len_1, ::binlayout::ByteOrder::Little)?;
        let c = ::binlayout::wire::read::<i64>(buffer, 8 + len_1, ::binlayout::ByteOrder::Little)?;
        let result = Self { symbol_name, a, b, c };
        Ok((result, 16 + len_1))
    }

    pub fn encode(&self, buffer: &mut [u8]) -> ::core::result::Result<usize, ::binlayout::CodecError> {
        ::binlayout::wire::require(buffer.len(), 16)?;
        let len_1 = ::binlayout::wire::encode_nested(buffer, 0, |rest| self.symbol_name.encode(rest))?;
        ::binlayout::wire::require(buffer.len(), 16 + len_1)?;
        ::binlayout::wire::write::<u32>(buffer, len_1, ::binlayout::ByteOrder::Little, self.a)?;
        ::binlayout::wire::write::<i32>(buffer, 4 + len_1, ::binlayout::ByteOrder::Little, self.b)?;
        ::binlayout::wire::write::<i64>(buffer, 8 + len_1, ::binlayout::ByteOrder::Little, self.c)?;
        Ok(16 + len_1)
    }
}
