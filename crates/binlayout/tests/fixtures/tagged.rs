impl Tagged {
    pub fn decode_little_endian(buffer: &[u8]) -> ::core::result::Result<(Self, usize), ::binlayout::CodecError> {
        ::binlayout::wire::require(buffer.len(), 3)?;
        let kind = ::binlayout::wire::read_enum::<Kind, u16>(buffer, 0, ::binlayout::ByteOrder::Little, "Kind")?;
        let flags = ::binlayout::wire::read::<i8>(buffer, 2, ::binlayout::ByteOrder::Little)?;
        let result = Self { kind, flags };
        Ok((result, 3))
    }

    pub fn encode_little_endian(&self, buffer: &mut [u8]) -> ::core::result::Result<usize, ::binlayout::CodecError> {
        ::binlayout::wire::require(buffer.len(), 3)?;
        ::binlayout::wire::write::<u16>(buffer, 0, ::binlayout::ByteOrder::Little, self.kind as u16)?;
        ::binlayout::wire::write::<i8>(buffer, 2, ::binlayout::ByteOrder::Little, self.flags)?;
        Ok(3)
    }

    pub fn decode_big_endian(buffer: &[u8]) -> ::core::result::Result<(Self, usize), ::binlayout::CodecError> {
        ::binlayout::wire::require(buffer.len(), 3)?;
        let kind = ::binlayout::wire::read_enum::<Kind, u16>(buffer, 0, ::binlayout::ByteOrder::Big, "Kind")?;
        let flags = ::binlayout::wire::read::<i8>(buffer, 2, ::binlayout::ByteOrder::Little)?;
        let result = Self { kind, flags };
        Ok((result, 3))
    }

    pub fn encode_big_endian(&self, buffer: &mut [u8]) -> ::core::result::Result<usize, ::binlayout::CodecError> {
        ::binlayout::wire::require(buffer.len(), 3)?;
        ::binlayout::wire::write::<u16>(buffer, 0, ::binlayout::ByteOrder::Big, self.kind as u16)?;
        ::binlayout::wire::write::<i8>(buffer, 2, ::binlayout::ByteOrder::Little, self.flags)?;
        Ok(3)
    }
}
