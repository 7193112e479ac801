use crate::{
    error::{Result, TodoError},
    models::NewTodo,
};

/// Validation utilities for incoming todo requests
pub struct TodoValidator;

impl TodoValidator {
    /// Validate task text
    ///
    /// A task must contain at least one non-whitespace character.
    ///
    /// # Returns
    /// * `Ok(())` - If the task is acceptable
    /// * `Err(TodoError::Validation)` - If the task is blank
    pub fn validate_task(task: &str) -> Result<()> {
        if task.trim().is_empty() {
            return Err(TodoError::empty_field("task"));
        }
        Ok(())
    }

    /// Validate a complete create request
    pub fn validate_new_todo(todo: &NewTodo) -> Result<()> {
        Self::validate_task(&todo.task)
    }
}
