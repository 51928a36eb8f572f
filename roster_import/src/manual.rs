/*!

This is the long-form manual for `roster_import` and `padron`.

## Input formats

The following file types are accepted, based on their extension:
* `.xlsx`, `.xls` Excel workbooks. Only the first worksheet is read.
* `.csv` Comma Separated Values. Files exported by spreadsheet programs
  with a `;` separator are also accepted.

Any other extension is rejected before the file is opened.

In all cases the first row contains the names of the columns. Empty rows are
ignored.

## Finding the columns

The names of the columns are compared after removing the case, the spaces and the
underscores: `Apellido_Paterno`, `APELLIDO PATERNO` and `apellidopaterno` are all
the same column name.

Three columns are searched for:
* the surname: the first column whose name contains `apellido`
* the first name: the first other column whose name contains `nombre`
* the national ID: the first other column whose name contains `dni`

A column named `Apellido y Nombre` is a surname column. These markers can be
changed in the configuration file of `padron`.

The national ID column is required. When it is missing, the import fails and the
list of column names found in the file is reported, so that the file can be fixed.

## Building the names

If at least one of the surname and first name columns is found, the name of a
member is `<surname> <first name>`. Otherwise the first column of the file is
taken to contain the full name.

Spaces at the start and at the end of the names and IDs are removed. Spaces inside
are kept as they are.

## Duplicates

Rows that repeat the same name and ID as an earlier row of the same file are
skipped. Two members with the same ID and different names are both kept.

*/
