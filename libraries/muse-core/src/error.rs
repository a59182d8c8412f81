/// Validation errors for Muse drafts and credentials
use thiserror::Error;

/// Result type alias using `ValidationError`
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A locally detected input problem.
///
/// These never reach the network and are always recoverable by correcting the
/// input. The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("El nombre solo puede contener letras, números, espacios, apostrofes y guiones")]
    NameCharacters,

    #[error("El título solo puede contener letras, números, espacios, apostrofes y guiones")]
    TitleCharacters,

    #[error("La descripcion solo puede contener letras, números, espacios, apostrofes y guiones")]
    DescriptionCharacters,

    #[error("El nombre es requerido")]
    NameRequired,

    #[error("El título es obligatorio")]
    TitleRequired,

    #[error("La descripción es requerida")]
    DescriptionRequired,

    #[error("El nombre no puede superar los {max} caracteres")]
    NameTooLong { max: usize },

    #[error("El título no puede superar los {max} caracteres")]
    TitleTooLong { max: usize },

    #[error("La descripción no puede superar los {max} caracteres")]
    DescriptionTooLong { max: usize },

    #[error("La fecha de creación es obligatoria")]
    CreationDateRequired,

    #[error("La fecha de creación no es válida")]
    CreationDateInvalid,

    #[error("Debe seleccionar un tipo de arte")]
    CategoryRequired,

    #[error("El tipo de arte seleccionado no está disponible")]
    CategoryUnavailable,

    #[error("La URL de la imagen no es válida")]
    ImageUrlInvalid,

    #[error("Ingrese una URL de imagen.")]
    ImageUrlRequired,

    #[error("El apellido es requerido")]
    LastnameRequired,

    #[error("El email es requerido")]
    EmailRequired,

    #[error("Por favor ingresa un email válido")]
    EmailInvalid,

    #[error("La contraseña es requerida")]
    PasswordRequired,

    #[error("Las contraseñas no coinciden")]
    PasswordMismatch,
}
