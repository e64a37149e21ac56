use super::csc::CscParts;
use super::map::MapParts;
use super::{CscMatrix, MapMatrix, StorageError};

fn rejected(err: StorageError) -> ::bincode::error::DecodeError {
    log::debug!("rejected decoded matrix: {err}");
    ::bincode::error::DecodeError::OtherString(err.to_string())
}

impl<T, __Context> ::bincode::Decode<__Context> for CscMatrix<T>
where
    T: ::bincode::Decode<__Context>,
{
    fn decode<__D: ::bincode::de::Decoder<Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        let parts: CscParts<T> = ::bincode::Decode::decode(decoder)?;
        CscMatrix::try_from(parts).map_err(rejected)
    }
}

impl<'__de, T, __Context> ::bincode::BorrowDecode<'__de, __Context> for CscMatrix<T>
where
    T: ::bincode::de::BorrowDecode<'__de, __Context>,
{
    fn borrow_decode<__D: ::bincode::de::BorrowDecoder<'__de, Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        let parts: CscParts<T> = ::bincode::BorrowDecode::<'_, __Context>::borrow_decode(decoder)?;
        CscMatrix::try_from(parts).map_err(rejected)
    }
}

impl<T, __Context> ::bincode::Decode<__Context> for MapMatrix<T>
where
    T: ::bincode::Decode<__Context>,
{
    fn decode<__D: ::bincode::de::Decoder<Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        let parts: MapParts<T> = ::bincode::Decode::decode(decoder)?;
        MapMatrix::try_from(parts).map_err(rejected)
    }
}

impl<'__de, T, __Context> ::bincode::BorrowDecode<'__de, __Context> for MapMatrix<T>
where
    T: ::bincode::de::BorrowDecode<'__de, __Context>,
{
    fn borrow_decode<__D: ::bincode::de::BorrowDecoder<'__de, Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        let parts: MapParts<T> = ::bincode::BorrowDecode::<'_, __Context>::borrow_decode(decoder)?;
        MapMatrix::try_from(parts).map_err(rejected)
    }
}
