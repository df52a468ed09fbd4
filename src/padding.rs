//! PKCS#7 style block padding
//!
//! The pad value equals the number of padding bytes, so a message whose length
//! is already a multiple of the block size gets a full extra block.
//!
//! message -> pad -> (len % block == 0)
//! padded -> unpad -> message

use crate::error::PaddingError;

pub const BLOCK_SIZE: usize = 16;

/// The pad value is stored in one byte
pub const MAX_BLOCK_SIZE: usize = u8::MAX as usize;

fn check_block_size(block_size: usize) -> Result<(), PaddingError> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(PaddingError::InvalidBlockSize(block_size));
    }
    Ok(())
}

pub fn pad(data: &[u8], block_size: usize) -> Result<Vec<u8>, PaddingError> {
    check_block_size(block_size)?;

    let padding_len = block_size - (data.len() % block_size);

    let mut padded = Vec::with_capacity(data.len() + padding_len);
    padded.extend_from_slice(data);
    padded.extend(std::iter::repeat(padding_len as u8).take(padding_len));

    Ok(padded)
}

/// Strips the padding added by [`pad`]. Only the trailing byte is inspected.
/// Empty input is returned as-is.
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8], PaddingError> {
    check_block_size(block_size)?;

    let Some(&last) = data.last() else {
        return Ok(data);
    };

    let padding_len = last as usize;
    if padding_len < 1 || padding_len > block_size {
        return Err(PaddingError::InvalidPadLength(last, block_size));
    }

    if padding_len > data.len() {
        return Err(PaddingError::Truncated {
            pad: padding_len,
            len: data.len(),
        });
    }

    Ok(&data[..data.len() - padding_len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_unpad() {
        for len in [0usize, 1, 15, 16, 17, 32] {
            let message: Vec<u8> = (0..len).map(|i| i as u8).collect();

            let padded = pad(&message, BLOCK_SIZE).unwrap();
            assert_eq!(padded.len() % BLOCK_SIZE, 0);
            assert!(padded.len() > message.len());

            assert_eq!(unpad(&padded, BLOCK_SIZE).unwrap(), &message[..]);
        }
    }

    #[test]
    fn test_pad_full_block() {
        // aligned input gets a whole block of 0x10
        let padded = pad(&[0xaa; 16], BLOCK_SIZE).unwrap();
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
    }

    #[test]
    fn test_unpad_rejects_out_of_range() {
        let mut zero = vec![0x41; 16];
        zero[15] = 0;
        assert_eq!(
            unpad(&zero, BLOCK_SIZE),
            Err(PaddingError::InvalidPadLength(0, BLOCK_SIZE))
        );

        let mut seventeen = vec![0x41; 32];
        seventeen[31] = 17;
        assert_eq!(
            unpad(&seventeen, BLOCK_SIZE),
            Err(PaddingError::InvalidPadLength(17, BLOCK_SIZE))
        );

        // must return an Err (pad longer than the data)
        assert!(unpad(&[4, 4, 4], BLOCK_SIZE).is_err());
    }

    #[test]
    fn test_block_size_bounds() {
        assert_eq!(pad(b"abc", 0), Err(PaddingError::InvalidBlockSize(0)));
        assert_eq!(pad(b"abc", 256), Err(PaddingError::InvalidBlockSize(256)));
        assert_eq!(unpad(&[1], 0), Err(PaddingError::InvalidBlockSize(0)));

        // largest block whose pad value still fits in a byte
        let padded = pad(b"abc", MAX_BLOCK_SIZE).unwrap();
        assert_eq!(padded.len(), 255);
        assert_eq!(padded[254], 252);
        assert_eq!(unpad(&padded, MAX_BLOCK_SIZE).unwrap(), b"abc");
    }

    #[test]
    fn test_unpad_empty() {
        assert_eq!(unpad(&[], BLOCK_SIZE).unwrap(), &[] as &[u8]);
    }
}
